use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::dm_notification_role::DmNotificationRole;

use entity::dm_notification_role::Column;

/// Repository for the per-role DM notification toggles.
pub struct DmNotificationRoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DmNotificationRoleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        guild_id: u64,
        role_id: u64,
    ) -> Result<Option<DmNotificationRole>, DbErr> {
        let entity =
            entity::prelude::DmNotificationRole::find_by_id((guild_id.to_string(), role_id.to_string()))
                .one(self.db)
                .await?;

        entity.map(DmNotificationRole::from_entity).transpose()
    }

    /// Returns the toggle of a role, registering it disabled when unknown.
    pub async fn get_or_register(
        &self,
        guild_id: u64,
        role_id: u64,
    ) -> Result<DmNotificationRole, DbErr> {
        if let Some(existing) = self.find(guild_id, role_id).await? {
            return Ok(existing);
        }

        let entity = entity::dm_notification_role::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            role_id: ActiveValue::Set(role_id.to_string()),
            enable_dm: ActiveValue::Set(false),
        }
        .insert(self.db)
        .await?;

        DmNotificationRole::from_entity(entity)
    }

    /// Sets the toggle of a role, registering it when unknown.
    pub async fn set_enabled(
        &self,
        guild_id: u64,
        role_id: u64,
        enable_dm: bool,
    ) -> Result<DmNotificationRole, DbErr> {
        let current = self.get_or_register(guild_id, role_id).await?;
        if current.enable_dm == enable_dm {
            return Ok(current);
        }

        let entity = entity::dm_notification_role::ActiveModel {
            guild_id: ActiveValue::Unchanged(guild_id.to_string()),
            role_id: ActiveValue::Unchanged(role_id.to_string()),
            enable_dm: ActiveValue::Set(enable_dm),
        }
        .update(self.db)
        .await?;

        DmNotificationRole::from_entity(entity)
    }

    /// Role ids of the guild whose members opted into DMs.
    pub async fn get_enabled_role_ids(&self, guild_id: u64) -> Result<Vec<u64>, DbErr> {
        entity::prelude::DmNotificationRole::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .filter(Column::EnableDm.eq(true))
            .all(self.db)
            .await?
            .into_iter()
            .map(|e| DmNotificationRole::from_entity(e).map(|r| r.role_id))
            .collect()
    }
}
