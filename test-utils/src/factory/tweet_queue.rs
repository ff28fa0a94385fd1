//! Tweet queue factory for creating pending tweet rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating queued tweets with customizable fields.
pub struct TweetQueueFactory<'a> {
    db: &'a DatabaseConnection,
    message_id: String,
    guild_id: String,
    channel_id: String,
    author_id: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl<'a> TweetQueueFactory<'a> {
    /// Creates a new TweetQueueFactory with auto-incremented ids and `"Tweet {id}"` content.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            message_id: id.to_string(),
            guild_id: next_id().to_string(),
            channel_id: next_id().to_string(),
            author_id: next_id().to_string(),
            content: format!("Tweet {}", id),
            created_at: Utc::now(),
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

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the queued tweet into the database.
    pub async fn build(self) -> Result<entity::tweet_queue::Model, DbErr> {
        entity::tweet_queue::ActiveModel {
            message_id: ActiveValue::Set(self.message_id),
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            author_id: ActiveValue::Set(self.author_id),
            content: ActiveValue::Set(self.content),
            created_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Queues a tweet in the given guild with default values.
pub async fn create_tweet(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::tweet_queue::Model, DbErr> {
    TweetQueueFactory::new(db).guild_id(guild_id).build().await
}
