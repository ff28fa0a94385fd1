use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    data::guild_setting::GuildSettingRepository,
    error::AppError,
    model::guild_setting::{GuildSetting, UpsertGuildSettingParam},
};

pub struct GuildSettingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores the bot roles of a guild.
    ///
    /// # Returns
    /// - `Ok((GuildSetting, true))` - The guild was registered
    /// - `Ok((GuildSetting, false))` - An existing setting was updated
    pub async fn init(&self, param: UpsertGuildSettingParam) -> Result<(GuildSetting, bool), AppError> {
        let (setting, created) = GuildSettingRepository::new(self.db).upsert(param).await?;

        tracing::info!(
            "{} guild {}: manager role {}, user role {}",
            if created { "Registered" } else { "Updated" },
            setting.guild_id,
            setting.bot_manager_role_id,
            setting.bot_user_role_id
        );

        Ok((setting, created))
    }

    pub async fn get(&self, guild_id: u64) -> Result<Option<GuildSetting>, AppError> {
        Ok(GuildSettingRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?)
    }

    pub async fn get_all(&self) -> Result<Vec<GuildSetting>, AppError> {
        Ok(GuildSettingRepository::new(self.db).get_all().await?)
    }
}
