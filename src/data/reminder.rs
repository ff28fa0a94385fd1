//! Scheduled reminder data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::reminder::{CreateReminderParam, Reminder};

use entity::reminder::Column;

/// Repository providing database operations for scheduled reminders.
pub struct ReminderRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReminderRepository<'a> {
    /// Creates a new ReminderRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ReminderRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new reminder.
    ///
    /// # Arguments
    /// - `param` - Channel, content and schedule of the reminder
    ///
    /// # Returns
    /// - `Ok(Reminder)` - The stored reminder with its generated id
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateReminderParam) -> Result<Reminder, DbErr> {
        let entity = entity::reminder::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            content: ActiveValue::Set(param.content),
            next_run_at: ActiveValue::Set(param.first_run_at),
            interval_minutes: ActiveValue::Set(param.interval_minutes),
            remaining: ActiveValue::Set(param.repeat),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Reminder::from_entity(entity)
    }

    /// Finds a reminder by id.
    ///
    /// # Returns
    /// - `Ok(Some(Reminder))` - Reminder found
    /// - `Ok(None)` - No reminder with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Reminder>, DbErr> {
        let entity = entity::prelude::Reminder::find_by_id(id)
            .one(self.db)
            .await?;

        entity.map(Reminder::from_entity).transpose()
    }

    /// Gets the reminders of a guild ordered by their next run.
    pub async fn get_by_guild_id(&self, guild_id: u64) -> Result<Vec<Reminder>, DbErr> {
        entity::prelude::Reminder::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(Column::NextRunAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Reminder::from_entity)
            .collect()
    }

    /// Gets reminders whose next run is at or before `now`.
    pub async fn get_due(&self, now: DateTime<Utc>) -> Result<Vec<Reminder>, DbErr> {
        entity::prelude::Reminder::find()
            .filter(Column::NextRunAt.lte(now))
            .order_by_asc(Column::NextRunAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Reminder::from_entity)
            .collect()
    }

    /// Moves a reminder to its next run.
    ///
    /// # Arguments
    /// - `id` - Reminder id
    /// - `next_run_at` - Time of the next run
    /// - `remaining` - Runs left including the next one, `None` for forever
    pub async fn reschedule(
        &self,
        id: i32,
        next_run_at: DateTime<Utc>,
        remaining: Option<i32>,
    ) -> Result<(), DbErr> {
        entity::prelude::Reminder::update_many()
            .col_expr(Column::NextRunAt, Expr::value(next_run_at))
            .col_expr(Column::Remaining, Expr::value(remaining))
            .filter(Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes a reminder, returning whether it existed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Reminder::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
