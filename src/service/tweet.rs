use chrono::{DateTime, Duration, Utc};
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    data::tweet_queue::TweetQueueRepository,
    error::AppError,
    model::tweet::{CreateTweetParam, QueuedTweet},
};

pub const TWEETS_PER_PAGE: u64 = 10;
/// Queued tweets are dropped once they are this old.
pub const TWEET_EXPIRE_AFTER_DAYS: i64 = 30;

/// A page of the approval queue.
#[derive(Debug, Clone, PartialEq)]
pub struct TweetPage {
    pub tweets: Vec<QueuedTweet>,
    /// One-indexed page number shown to the user.
    pub page: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

pub struct TweetService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TweetService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn queue(&self, param: CreateTweetParam) -> Result<QueuedTweet, AppError> {
        let tweet = TweetQueueRepository::new(self.db).create(param).await?;

        tracing::info!(
            "User {} requested tweet {} in guild {}: {}",
            tweet.author_id,
            tweet.message_id,
            tweet.guild_id,
            tweet.content
        );

        Ok(tweet)
    }

    /// Removes a queued tweet of the guild.
    ///
    /// # Returns
    /// - `Ok(QueuedTweet)` - The removed tweet
    /// - `Err(AppError::NotFound)` - Nothing queued under that message in this guild
    pub async fn remove(&self, guild_id: u64, message_id: u64) -> Result<QueuedTweet, AppError> {
        let repo = TweetQueueRepository::new(self.db);

        let tweet = repo
            .find_by_message_id(message_id)
            .await?
            .filter(|t| t.guild_id == guild_id)
            .ok_or_else(|| AppError::NotFound(format!("{} is not queued", message_id)))?;

        repo.delete(message_id).await?;

        Ok(tweet)
    }

    /// Gets one page of the guild's queue. `page` is one-indexed; zero is treated as one.
    pub async fn list(&self, guild_id: u64, page: u64) -> Result<TweetPage, AppError> {
        let page = page.max(1);
        let (tweets, total_items) = TweetQueueRepository::new(self.db)
            .get_by_guild_paginated(guild_id, page - 1, TWEETS_PER_PAGE)
            .await?;

        Ok(TweetPage {
            tweets,
            page,
            total_pages: total_items.div_ceil(TWEETS_PER_PAGE).max(1),
            total_items,
        })
    }

    /// The queued tweet behind an approval message, if any.
    pub async fn find(&self, message_id: u64) -> Result<Option<QueuedTweet>, AppError> {
        Ok(TweetQueueRepository::new(self.db)
            .find_by_message_id(message_id)
            .await?)
    }

    /// Claims a tweet for posting by removing it from the queue.
    ///
    /// Returns false when another approval already claimed it.
    pub async fn claim(&self, message_id: u64) -> Result<bool, AppError> {
        Ok(TweetQueueRepository::new(self.db).delete(message_id).await?)
    }

    /// Puts a claimed tweet back after posting failed. The queue time restarts.
    pub async fn requeue(&self, tweet: &QueuedTweet) -> Result<QueuedTweet, AppError> {
        Ok(TweetQueueRepository::new(self.db)
            .create(CreateTweetParam {
                message_id: tweet.message_id,
                guild_id: tweet.guild_id,
                channel_id: tweet.channel_id,
                author_id: tweet.author_id,
                content: tweet.content.clone(),
            })
            .await?)
    }

    /// Deletes tweets queued longer than the expiry and returns them.
    pub async fn expire(&self, now: DateTime<Utc>) -> Result<Vec<QueuedTweet>, AppError> {
        let repo = TweetQueueRepository::new(self.db);
        let candidates = repo
            .get_created_before(now - Duration::days(TWEET_EXPIRE_AFTER_DAYS))
            .await?;

        let mut expired = Vec::new();
        for tweet in candidates {
            if repo.delete(tweet.message_id).await? {
                expired.push(tweet);
            }
        }

        Ok(expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory::tweet_queue::TweetQueueFactory};

    #[tokio::test]
    async fn lists_pages_of_ten() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::TweetQueue)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        for _ in 0..12 {
            TweetQueueFactory::new(db).guild_id("1").build().await?;
        }

        let service = TweetService::new(db);

        let first = service.list(1, 0).await?;
        assert_eq!(first.page, 1);
        assert_eq!(first.tweets.len(), 10);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.total_items, 12);

        let second = service.list(1, 2).await?;
        assert_eq!(second.tweets.len(), 2);

        let empty = service.list(2, 1).await?;
        assert!(empty.tweets.is_empty());
        assert_eq!(empty.total_pages, 1);

        Ok(())
    }

    #[tokio::test]
    async fn remove_reports_unqueued_message() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::TweetQueue)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        TweetQueueFactory::new(db)
            .message_id("10")
            .guild_id("1")
            .build()
            .await?;

        let service = TweetService::new(db);

        assert!(matches!(service.remove(1, 11).await, Err(AppError::NotFound(_))));
        assert_eq!(service.remove(1, 10).await?.message_id, 10);
        assert!(!service.claim(10).await?);

        Ok(())
    }

    #[tokio::test]
    async fn expires_old_tweets() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::TweetQueue)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let now = Utc::now();
        TweetQueueFactory::new(db)
            .message_id("10")
            .created_at(now - Duration::days(TWEET_EXPIRE_AFTER_DAYS + 1))
            .build()
            .await?;
        TweetQueueFactory::new(db).message_id("11").build().await?;

        let expired = TweetService::new(db).expire(now).await?;

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].message_id, 10);

        Ok(())
    }
}
