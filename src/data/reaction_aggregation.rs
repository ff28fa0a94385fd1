//! Reaction aggregation data repository.
//!
//! Counter updates are single `UPDATE` statements so that concurrent reaction events
//! never lose an increment. Decrements only match rows whose counter is positive, which
//! keeps `sum` and `matte` from going below zero.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::reaction_aggregation::{
    CreateReactionAggregationParam, ReactionAggregation, ReactionKind,
};
use crate::util::parse::join_ids;

use entity::reaction_aggregation::Column;

/// Repository providing database operations for reaction aggregations.
pub struct ReactionAggregationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReactionAggregationRepository<'a> {
    /// Creates a new ReactionAggregationRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ReactionAggregationRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new aggregation with zeroed counters.
    ///
    /// # Arguments
    /// - `param` - Message, target and allowed contributors of the aggregation
    ///
    /// # Returns
    /// - `Ok(ReactionAggregation)` - The stored aggregation
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        param: CreateReactionAggregationParam,
    ) -> Result<ReactionAggregation, DbErr> {
        let entity = entity::reaction_aggregation::ActiveModel {
            message_id: ActiveValue::Set(param.message_id.to_string()),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            command_message_id: ActiveValue::Set(param.command_message_id.to_string()),
            target_value: ActiveValue::Set(param.target_value),
            sum: ActiveValue::Set(0),
            matte: ActiveValue::Set(0),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            notified_at: ActiveValue::Set(None),
            reminded: ActiveValue::Set(false),
            allowed_ids: ActiveValue::Set(join_ids(&param.allowed_ids)),
        }
        .insert(self.db)
        .await?;

        ReactionAggregation::from_entity(entity)
    }

    /// Finds the aggregation collecting reactions on `message_id`.
    pub async fn find_by_message_id(
        &self,
        message_id: u64,
    ) -> Result<Option<ReactionAggregation>, DbErr> {
        let entity = entity::prelude::ReactionAggregation::find_by_id(message_id.to_string())
            .one(self.db)
            .await?;

        entity.map(ReactionAggregation::from_entity).transpose()
    }

    /// Gets the aggregations of a guild still waiting for their target, oldest first.
    ///
    /// Completed aggregations stay stored until cleanup but are no longer listed.
    pub async fn get_open_by_guild_id(
        &self,
        guild_id: u64,
    ) -> Result<Vec<ReactionAggregation>, DbErr> {
        entity::prelude::ReactionAggregation::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .filter(Column::NotifiedAt.is_null())
            .order_by_asc(Column::CreatedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(ReactionAggregation::from_entity)
            .collect()
    }

    /// Atomically increments the counter matching `kind`.
    ///
    /// # Returns
    /// - `Ok(true)` - The counter was incremented
    /// - `Ok(false)` - No aggregation exists for the message
    /// - `Err(DbErr)` - Database error during update
    pub async fn increment(&self, message_id: u64, kind: ReactionKind) -> Result<bool, DbErr> {
        let column = counter_column(kind);

        let result = entity::prelude::ReactionAggregation::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(Column::MessageId.eq(message_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Atomically decrements the counter matching `kind`, never below zero.
    ///
    /// # Returns
    /// - `Ok(true)` - The counter was decremented
    /// - `Ok(false)` - No aggregation exists or the counter is already zero
    /// - `Err(DbErr)` - Database error during update
    pub async fn decrement(&self, message_id: u64, kind: ReactionKind) -> Result<bool, DbErr> {
        let column = counter_column(kind);

        let result = entity::prelude::ReactionAggregation::update_many()
            .col_expr(column, Expr::col(column).sub(1))
            .filter(Column::MessageId.eq(message_id.to_string()))
            .filter(column.gt(0))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks the aggregation as notified unless another event already did.
    ///
    /// The conditional update makes the completion notice fire exactly once even when
    /// two reaction events complete the aggregation concurrently.
    ///
    /// # Returns
    /// - `Ok(true)` - This call set `notified_at`; the caller must post the notice
    /// - `Ok(false)` - The aggregation was already notified or no longer exists
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_notified(&self, message_id: u64, at: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::ReactionAggregation::update_many()
            .col_expr(Column::NotifiedAt, Expr::value(at))
            .filter(Column::MessageId.eq(message_id.to_string()))
            .filter(Column::NotifiedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks the stale reminder as sent unless it already was.
    ///
    /// # Returns
    /// - `Ok(true)` - This call set `reminded`
    /// - `Ok(false)` - Already reminded or no longer exists
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_reminded(&self, message_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::ReactionAggregation::update_many()
            .col_expr(Column::Reminded, Expr::value(true))
            .filter(Column::MessageId.eq(message_id.to_string()))
            .filter(Column::Reminded.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Open aggregations created at or before `cutoff` that have not been reminded yet.
    pub async fn get_needing_reminder(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ReactionAggregation>, DbErr> {
        entity::prelude::ReactionAggregation::find()
            .filter(Column::NotifiedAt.is_null())
            .filter(Column::Reminded.eq(false))
            .filter(Column::CreatedAt.lte(cutoff))
            .all(self.db)
            .await?
            .into_iter()
            .map(ReactionAggregation::from_entity)
            .collect()
    }

    /// Open aggregations created at or before `cutoff`.
    ///
    /// Completed ones are left to `delete_notified_before`.
    pub async fn get_open_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ReactionAggregation>, DbErr> {
        entity::prelude::ReactionAggregation::find()
            .filter(Column::NotifiedAt.is_null())
            .filter(Column::CreatedAt.lte(cutoff))
            .all(self.db)
            .await?
            .into_iter()
            .map(ReactionAggregation::from_entity)
            .collect()
    }

    /// Deletes aggregations that were notified at or before `cutoff`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of deleted rows
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_notified_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::ReactionAggregation::delete_many()
            .filter(Column::NotifiedAt.lte(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes one aggregation.
    ///
    /// # Returns
    /// - `Ok(true)` - The aggregation was deleted
    /// - `Ok(false)` - No aggregation exists for the message
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, message_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::ReactionAggregation::delete_by_id(message_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes every aggregation of a guild and returns how many were removed.
    pub async fn delete_by_guild_id(&self, guild_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::ReactionAggregation::delete_many()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

fn counter_column(kind: ReactionKind) -> Column {
    match kind {
        ReactionKind::Count => Column::Sum,
        ReactionKind::Matte => Column::Matte,
    }
}
