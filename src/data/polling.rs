use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::polling::{CreatePollingParam, Polling};
use crate::util::parse::join_ids;

/// Repository providing database operations for open polls.
pub struct PollingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PollingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new poll.
    ///
    /// # Returns
    /// - `Ok(Polling)` - The stored poll
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreatePollingParam) -> Result<Polling, DbErr> {
        let entity = entity::polling::ActiveModel {
            message_id: ActiveValue::Set(param.message_id.to_string()),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            question: ActiveValue::Set(param.question),
            created_at: ActiveValue::Set(Utc::now()),
            allowed_ids: ActiveValue::Set(join_ids(&param.allowed_ids)),
        }
        .insert(self.db)
        .await?;

        Polling::from_entity(entity)
    }

    pub async fn find_by_message_id(&self, message_id: u64) -> Result<Option<Polling>, DbErr> {
        let entity = entity::prelude::Polling::find_by_id(message_id.to_string())
            .one(self.db)
            .await?;

        entity.map(Polling::from_entity).transpose()
    }

    /// Deletes a poll, returning whether it existed.
    pub async fn delete(&self, message_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::Polling::delete_by_id(message_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes polls created at or before `cutoff` and returns how many were removed.
    pub async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Polling::delete_many()
            .filter(entity::polling::Column::CreatedAt.lte(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
