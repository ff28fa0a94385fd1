use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Reaction that grants the role.
pub const JOIN_EMOJI: &str = "👍";
/// Reaction that revokes the role.
pub const LEAVE_EMOJI: &str = "❎";

/// A message that hands out a role through reactions.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleReaction {
    pub message_id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub role_id: u64,
    pub author_id: u64,
    pub created_at: DateTime<Utc>,
}

/// Role change requested by a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAction {
    Grant(u64),
    Revoke(u64),
}

impl RoleReaction {
    pub fn from_entity(entity: entity::role_reaction::Model) -> Result<Self, DbErr> {
        let parse = |field: &str, value: &str| {
            value
                .parse::<u64>()
                .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
        };

        Ok(Self {
            message_id: parse("message_id", &entity.message_id)?,
            guild_id: parse("guild_id", &entity.guild_id)?,
            channel_id: parse("channel_id", &entity.channel_id)?,
            role_id: parse("role_id", &entity.role_id)?,
            author_id: parse("author_id", &entity.author_id)?,
            created_at: entity.created_at,
        })
    }

    /// Maps a reaction event to a role change.
    ///
    /// Adding 👍 grants, adding ❎ revokes and withdrawing 👍 revokes. Anything else,
    /// including withdrawing ❎, leaves the member's roles alone.
    pub fn action_for(&self, emoji: &str, added: bool) -> Option<RoleAction> {
        match (emoji, added) {
            (JOIN_EMOJI, true) => Some(RoleAction::Grant(self.role_id)),
            (LEAVE_EMOJI, true) | (JOIN_EMOJI, false) => Some(RoleAction::Revoke(self.role_id)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRoleReactionParam {
    pub message_id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub role_id: u64,
    pub author_id: u64,
}
