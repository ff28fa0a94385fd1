use sea_orm::DatabaseConnection;

use crate::{data::guild_setting::GuildSettingRepository, error::AppError};

/// Checks the bot roles configured for a guild.
pub struct PermissionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PermissionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Whether a member holding `role_ids` may use ordinary bot commands.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the command was issued in, `None` for direct messages
    /// - `role_ids` - Roles of the invoking member
    ///
    /// # Returns
    /// - `Ok(true)` - The member has the bot user or bot manager role
    /// - `Ok(false)` - Outside a guild, guild not initialized, or role missing
    /// - `Err(AppError)` - Database error
    pub async fn is_bot_user(&self, guild_id: Option<u64>, role_ids: &[u64]) -> Result<bool, AppError> {
        let Some(guild_id) = guild_id else {
            return Ok(false);
        };

        let setting = GuildSettingRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?;

        Ok(setting.is_some_and(|s| s.is_bot_user(role_ids)))
    }

    /// Whether a member holding `role_ids` may use management commands.
    pub async fn is_bot_manager(
        &self,
        guild_id: Option<u64>,
        role_ids: &[u64],
    ) -> Result<bool, AppError> {
        let Some(guild_id) = guild_id else {
            return Ok(false);
        };

        let setting = GuildSettingRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?;

        Ok(setting.is_some_and(|s| s.is_bot_manager(role_ids)))
    }

    /// Requires the bot user role and returns the guild id.
    ///
    /// # Returns
    /// - `Ok(u64)` - Guild the command was issued in
    /// - `Err(AppError::Forbidden)` - Outside a guild or role missing
    pub async fn require_bot_user(
        &self,
        guild_id: Option<u64>,
        role_ids: &[u64],
    ) -> Result<u64, AppError> {
        match guild_id {
            Some(id) if self.is_bot_user(guild_id, role_ids).await? => Ok(id),
            _ => Err(AppError::Forbidden(
                "You do not have permission to use this command".to_string(),
            )),
        }
    }

    /// Requires the bot manager role and returns the guild id.
    pub async fn require_bot_manager(
        &self,
        guild_id: Option<u64>,
        role_ids: &[u64],
    ) -> Result<u64, AppError> {
        match guild_id {
            Some(id) if self.is_bot_manager(guild_id, role_ids).await? => Ok(id),
            _ => Err(AppError::Forbidden(
                "This command is limited to bot managers".to_string(),
            )),
        }
    }
}
