//! Guild setting data repository.
//!
//! Stores the bot manager and bot user roles configured per guild. Every permission
//! check reads through this repository.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::model::guild_setting::{GuildSetting, UpsertGuildSettingParam};

/// Repository providing database operations for guild settings.
pub struct GuildSettingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingRepository<'a> {
    /// Creates a new GuildSettingRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `GuildSettingRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the setting of a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Some(GuildSetting))` - The guild has been initialized
    /// - `Ok(None)` - No setting exists for the guild
    /// - `Err(DbErr)` - Database error or malformed stored id
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GuildSetting>, DbErr> {
        let entity = entity::prelude::GuildSetting::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        entity.map(GuildSetting::from_entity).transpose()
    }

    /// Creates or replaces the setting of a guild.
    ///
    /// # Arguments
    /// - `param` - Guild and the two bot roles
    ///
    /// # Returns
    /// - `Ok((GuildSetting, true))` - A new setting was created
    /// - `Ok((GuildSetting, false))` - An existing setting was updated
    /// - `Err(DbErr)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertGuildSettingParam) -> Result<(GuildSetting, bool), DbErr> {
        let existing = entity::prelude::GuildSetting::find_by_id(param.guild_id.to_string())
            .one(self.db)
            .await?;

        let active = entity::guild_setting::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            bot_manager_role_id: ActiveValue::Set(param.bot_manager_role_id.to_string()),
            bot_user_role_id: ActiveValue::Set(param.bot_user_role_id.to_string()),
        };

        let (entity, created) = match existing {
            Some(_) => (active.update(self.db).await?, false),
            None => (active.insert(self.db).await?, true),
        };

        Ok((GuildSetting::from_entity(entity)?, created))
    }

    /// Gets the settings of every initialized guild.
    pub async fn get_all(&self) -> Result<Vec<GuildSetting>, DbErr> {
        entity::prelude::GuildSetting::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(GuildSetting::from_entity)
            .collect()
    }
}
