use sea_orm::DbErr;

/// Bot roles configured for a guild with `/s_init`.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildSetting {
    pub guild_id: u64,
    /// Members with this role may run management commands.
    pub bot_manager_role_id: u64,
    /// Members with this role may run ordinary bot commands.
    pub bot_user_role_id: u64,
}

impl GuildSetting {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(GuildSetting)` - Successfully converted model
    /// - `Err(DbErr::Custom)` - A stored id is not a valid u64
    pub fn from_entity(entity: entity::guild_setting::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;
        let bot_manager_role_id = entity
            .bot_manager_role_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse bot_manager_role_id: {}", e)))?;
        let bot_user_role_id = entity
            .bot_user_role_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse bot_user_role_id: {}", e)))?;

        Ok(Self {
            guild_id,
            bot_manager_role_id,
            bot_user_role_id,
        })
    }

    /// True when `role_ids` contains the manager role.
    pub fn is_bot_manager(&self, role_ids: &[u64]) -> bool {
        role_ids.contains(&self.bot_manager_role_id)
    }

    /// True when `role_ids` contains the user role or the manager role.
    pub fn is_bot_user(&self, role_ids: &[u64]) -> bool {
        role_ids.contains(&self.bot_user_role_id) || self.is_bot_manager(role_ids)
    }
}

/// Parameters for creating or replacing a guild setting.
#[derive(Debug, Clone)]
pub struct UpsertGuildSettingParam {
    pub guild_id: u64,
    pub bot_manager_role_id: u64,
    pub bot_user_role_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setting() -> GuildSetting {
        GuildSetting {
            guild_id: 1,
            bot_manager_role_id: 10,
            bot_user_role_id: 20,
        }
    }

    #[test]
    fn manager_is_also_user() {
        let setting = setting();
        assert!(setting.is_bot_manager(&[10]));
        assert!(setting.is_bot_user(&[10]));
    }

    #[test]
    fn user_is_not_manager() {
        let setting = setting();
        assert!(setting.is_bot_user(&[5, 20]));
        assert!(!setting.is_bot_manager(&[5, 20]));
    }

    #[test]
    fn unrelated_roles_have_no_permission() {
        let setting = setting();
        assert!(!setting.is_bot_user(&[]));
        assert!(!setting.is_bot_user(&[30]));
    }
}
