use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::tweet::{CreateTweetParam, QueuedTweet};

use entity::tweet_queue::Column;

/// Repository providing database operations for tweets awaiting approval.
pub struct TweetQueueRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TweetQueueRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Queues a tweet under its approval message.
    pub async fn create(&self, param: CreateTweetParam) -> Result<QueuedTweet, DbErr> {
        let entity = entity::tweet_queue::ActiveModel {
            message_id: ActiveValue::Set(param.message_id.to_string()),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            content: ActiveValue::Set(param.content),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        QueuedTweet::from_entity(entity)
    }

    pub async fn find_by_message_id(&self, message_id: u64) -> Result<Option<QueuedTweet>, DbErr> {
        let entity = entity::prelude::TweetQueue::find_by_id(message_id.to_string())
            .one(self.db)
            .await?;

        entity.map(QueuedTweet::from_entity).transpose()
    }

    /// Gets a page of the guild's queue, oldest first.
    ///
    /// # Arguments
    /// - `guild_id` - Guild owning the queue
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of tweets per page
    ///
    /// # Returns
    /// - `Ok((tweets, total))` - Tweets on the page and the total queued in the guild
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_by_guild_paginated(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<QueuedTweet>, u64), DbErr> {
        let paginator = entity::prelude::TweetQueue::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(Column::CreatedAt)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let tweets = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(QueuedTweet::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((tweets, total))
    }

    /// Gets tweets queued at or before `cutoff`.
    pub async fn get_created_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<QueuedTweet>, DbErr> {
        entity::prelude::TweetQueue::find()
            .filter(Column::CreatedAt.lte(cutoff))
            .all(self.db)
            .await?
            .into_iter()
            .map(QueuedTweet::from_entity)
            .collect()
    }

    /// Removes a tweet from the queue, returning whether it was queued.
    pub async fn delete(&self, message_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::TweetQueue::delete_by_id(message_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
