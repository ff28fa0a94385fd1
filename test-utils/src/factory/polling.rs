//! Polling factory for creating open poll rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test polls with customizable fields.
pub struct PollingFactory<'a> {
    db: &'a DatabaseConnection,
    message_id: String,
    guild_id: String,
    channel_id: String,
    author_id: String,
    question: String,
    created_at: DateTime<Utc>,
    allowed_ids: String,
}

impl<'a> PollingFactory<'a> {
    /// Creates a new PollingFactory with default values.
    ///
    /// Defaults:
    /// - all ids: auto-incremented
    /// - question: `"Question {id}"`
    /// - created_at: now, allowed_ids: empty
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            message_id: id.to_string(),
            guild_id: next_id().to_string(),
            channel_id: next_id().to_string(),
            author_id: next_id().to_string(),
            question: format!("Question {}", id),
            created_at: Utc::now(),
            allowed_ids: String::new(),
        }
    }

    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = message_id.into();
        self
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn author_id(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = author_id.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn allowed_ids(mut self, allowed_ids: impl Into<String>) -> Self {
        self.allowed_ids = allowed_ids.into();
        self
    }

    /// Builds and inserts the poll into the database.
    pub async fn build(self) -> Result<entity::polling::Model, DbErr> {
        entity::polling::ActiveModel {
            message_id: ActiveValue::Set(self.message_id),
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            author_id: ActiveValue::Set(self.author_id),
            question: ActiveValue::Set(self.question),
            created_at: ActiveValue::Set(self.created_at),
            allowed_ids: ActiveValue::Set(self.allowed_ids),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a poll with default values.
pub async fn create_polling(db: &DatabaseConnection) -> Result<entity::polling::Model, DbErr> {
    PollingFactory::new(db).build().await
}
