//! Reminder factory for creating scheduled reminder rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test reminders with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let reminder = ReminderFactory::new(&db)
///     .next_run_at(Utc::now() - Duration::minutes(1))
///     .interval_minutes(Some(60))
///     .remaining(Some(2))
///     .build()
///     .await?;
/// ```
pub struct ReminderFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    channel_id: String,
    author_id: String,
    content: String,
    next_run_at: DateTime<Utc>,
    interval_minutes: Option<i32>,
    remaining: Option<i32>,
    created_at: DateTime<Utc>,
}

impl<'a> ReminderFactory<'a> {
    /// Creates a new ReminderFactory with default values.
    ///
    /// Defaults:
    /// - ids: auto-incremented
    /// - content: `"Reminder {id}"`
    /// - next_run_at: one hour from now
    /// - one-shot (`interval_minutes` and `remaining` are `None` / `Some(1)`)
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: next_id().to_string(),
            channel_id: next_id().to_string(),
            author_id: next_id().to_string(),
            content: format!("Reminder {}", id),
            next_run_at: Utc::now() + Duration::hours(1),
            interval_minutes: None,
            remaining: Some(1),
            created_at: Utc::now(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn author_id(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = author_id.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn next_run_at(mut self, next_run_at: DateTime<Utc>) -> Self {
        self.next_run_at = next_run_at;
        self
    }

    pub fn interval_minutes(mut self, interval_minutes: Option<i32>) -> Self {
        self.interval_minutes = interval_minutes;
        self
    }

    pub fn remaining(mut self, remaining: Option<i32>) -> Self {
        self.remaining = remaining;
        self
    }

    /// Builds and inserts the reminder into the database.
    pub async fn build(self) -> Result<entity::reminder::Model, DbErr> {
        entity::reminder::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            author_id: ActiveValue::Set(self.author_id),
            content: ActiveValue::Set(self.content),
            next_run_at: ActiveValue::Set(self.next_run_at),
            interval_minutes: ActiveValue::Set(self.interval_minutes),
            remaining: ActiveValue::Set(self.remaining),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a one-shot reminder in the given guild.
pub async fn create_reminder(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::reminder::Model, DbErr> {
    ReminderFactory::new(db).guild_id(guild_id).build().await
}
