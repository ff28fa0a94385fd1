use sea_orm::DbErr;

/// Prefix of the custom id carried by DM toggle buttons.
pub const DM_TOGGLE_PREFIX: &str = "dm_toggle";
/// Roles with this many members or more are not offered as DM targets.
pub const MAX_ROLE_MEMBERS: usize = 30;
/// Discord allows at most this many buttons per message across action rows.
pub const MAX_TOGGLE_ROLES: usize = 10;

/// Whether members of a guild role receive a DM when an aggregation targets them.
#[derive(Debug, Clone, PartialEq)]
pub struct DmNotificationRole {
    pub guild_id: u64,
    pub role_id: u64,
    pub enable_dm: bool,
}

impl DmNotificationRole {
    pub fn from_entity(entity: entity::dm_notification_role::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;
        let role_id = entity
            .role_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse role_id: {}", e)))?;

        Ok(Self {
            guild_id,
            role_id,
            enable_dm: entity.enable_dm,
        })
    }
}

/// Custom id of the toggle button for a role.
pub fn dm_toggle_custom_id(guild_id: u64, role_id: u64) -> String {
    format!("{}_{}_{}", DM_TOGGLE_PREFIX, guild_id, role_id)
}

/// Parses a toggle button custom id back into `(guild_id, role_id)`.
pub fn parse_dm_toggle_custom_id(custom_id: &str) -> Option<(u64, u64)> {
    let rest = custom_id.strip_prefix(DM_TOGGLE_PREFIX)?.strip_prefix('_')?;
    let (guild_id, role_id) = rest.split_once('_')?;

    Some((guild_id.parse().ok()?, role_id.parse().ok()?))
}

/// Whether a role may be offered as a DM target.
///
/// Large roles and bot roles are excluded, as is `@everyone`.
pub fn is_eligible_role(name: &str, member_count: usize, is_everyone: bool) -> bool {
    !is_everyone && member_count < MAX_ROLE_MEMBERS && !name.to_lowercase().contains("bot")
}
