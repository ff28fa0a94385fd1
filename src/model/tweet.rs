use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Reaction an approver adds to publish a queued tweet.
pub const APPROVE_EMOJI: &str = "✅";

/// A tweet waiting for approval.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedTweet {
    /// Approval message posted by the bot.
    pub message_id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl QueuedTweet {
    pub fn from_entity(entity: entity::tweet_queue::Model) -> Result<Self, DbErr> {
        let parse = |field: &str, value: &str| {
            value
                .parse::<u64>()
                .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
        };

        Ok(Self {
            message_id: parse("message_id", &entity.message_id)?,
            guild_id: parse("guild_id", &entity.guild_id)?,
            channel_id: parse("channel_id", &entity.channel_id)?,
            author_id: parse("author_id", &entity.author_id)?,
            content: entity.content,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateTweetParam {
    pub message_id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub content: String,
}

/// Result of publishing a tweet through the Twitter API.
#[derive(Debug, Clone, PartialEq)]
pub enum TweetPostResult {
    /// The API accepted the tweet. The id is missing when the success body couldn't be read.
    Posted { tweet_id: Option<String> },
    /// The API answered with a non-success status.
    Rejected { status: u16 },
}
