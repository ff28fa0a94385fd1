//! Guild setting factory for creating test guild configuration rows.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test guild settings with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::guild_setting::GuildSettingFactory;
///
/// let setting = GuildSettingFactory::new(&db)
///     .guild_id("987654321")
///     .bot_manager_role_id("111")
///     .build()
///     .await?;
/// ```
pub struct GuildSettingFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    bot_manager_role_id: String,
    bot_user_role_id: String,
}

impl<'a> GuildSettingFactory<'a> {
    /// Creates a new GuildSettingFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: auto-incremented id
    /// - bot_manager_role_id: auto-incremented id
    /// - bot_user_role_id: auto-incremented id
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            bot_manager_role_id: next_id().to_string(),
            bot_user_role_id: next_id().to_string(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn bot_manager_role_id(mut self, role_id: impl Into<String>) -> Self {
        self.bot_manager_role_id = role_id.into();
        self
    }

    pub fn bot_user_role_id(mut self, role_id: impl Into<String>) -> Self {
        self.bot_user_role_id = role_id.into();
        self
    }

    /// Builds and inserts the guild setting into the database.
    ///
    /// # Returns
    /// - `Ok(entity::guild_setting::Model)` - Created setting
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::guild_setting::Model, DbErr> {
        entity::guild_setting::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            bot_manager_role_id: ActiveValue::Set(self.bot_manager_role_id),
            bot_user_role_id: ActiveValue::Set(self.bot_user_role_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a guild setting with default values.
///
/// Shorthand for `GuildSettingFactory::new(db).build().await`.
pub async fn create_guild_setting(
    db: &DatabaseConnection,
) -> Result<entity::guild_setting::Model, DbErr> {
    GuildSettingFactory::new(db).build().await
}
