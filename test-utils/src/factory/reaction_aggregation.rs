//! Reaction aggregation factory for creating open aggregation rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test reaction aggregations with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::reaction_aggregation::ReactionAggregationFactory;
///
/// let aggregation = ReactionAggregationFactory::new(&db)
///     .target_value(3)
///     .sum(2)
///     .allowed_ids("111,222")
///     .build()
///     .await?;
/// ```
pub struct ReactionAggregationFactory<'a> {
    db: &'a DatabaseConnection,
    message_id: String,
    guild_id: String,
    channel_id: String,
    command_message_id: String,
    target_value: i32,
    sum: i32,
    matte: i32,
    author_id: String,
    created_at: DateTime<Utc>,
    notified_at: Option<DateTime<Utc>>,
    reminded: bool,
    allowed_ids: String,
}

impl<'a> ReactionAggregationFactory<'a> {
    /// Creates a new ReactionAggregationFactory with default values.
    ///
    /// Defaults:
    /// - all ids: auto-incremented
    /// - target_value: `5`, sum and matte: `0`
    /// - created_at: now, notified_at: `None`, reminded: `false`
    /// - allowed_ids: empty (unrestricted)
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let message_id = next_id().to_string();
        Self {
            db,
            command_message_id: message_id.clone(),
            message_id,
            guild_id: next_id().to_string(),
            channel_id: next_id().to_string(),
            target_value: 5,
            sum: 0,
            matte: 0,
            author_id: next_id().to_string(),
            created_at: Utc::now(),
            notified_at: None,
            reminded: false,
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

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn author_id(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = author_id.into();
        self
    }

    pub fn target_value(mut self, target_value: i32) -> Self {
        self.target_value = target_value;
        self
    }

    pub fn sum(mut self, sum: i32) -> Self {
        self.sum = sum;
        self
    }

    pub fn matte(mut self, matte: i32) -> Self {
        self.matte = matte;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn notified_at(mut self, notified_at: Option<DateTime<Utc>>) -> Self {
        self.notified_at = notified_at;
        self
    }

    pub fn reminded(mut self, reminded: bool) -> Self {
        self.reminded = reminded;
        self
    }

    /// Sets the comma-joined list of role/user ids allowed to contribute.
    pub fn allowed_ids(mut self, allowed_ids: impl Into<String>) -> Self {
        self.allowed_ids = allowed_ids.into();
        self
    }

    /// Builds and inserts the aggregation into the database.
    ///
    /// # Returns
    /// - `Ok(entity::reaction_aggregation::Model)` - Created aggregation
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::reaction_aggregation::Model, DbErr> {
        entity::reaction_aggregation::ActiveModel {
            message_id: ActiveValue::Set(self.message_id),
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            command_message_id: ActiveValue::Set(self.command_message_id),
            target_value: ActiveValue::Set(self.target_value),
            sum: ActiveValue::Set(self.sum),
            matte: ActiveValue::Set(self.matte),
            author_id: ActiveValue::Set(self.author_id),
            created_at: ActiveValue::Set(self.created_at),
            notified_at: ActiveValue::Set(self.notified_at),
            reminded: ActiveValue::Set(self.reminded),
            allowed_ids: ActiveValue::Set(self.allowed_ids),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an aggregation in the given guild with default values.
pub async fn create_reaction_aggregation(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::reaction_aggregation::Model, DbErr> {
    ReactionAggregationFactory::new(db)
        .guild_id(guild_id)
        .build()
        .await
}
