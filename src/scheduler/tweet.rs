use chrono::Utc;
use dioxus_logger::tracing;
use serenity::all::{ChannelId, MessageId};

use super::JobContext;
use crate::{error::AppError, service::tweet::TweetService};

/// Drops tweet requests left unapproved and clears their approval reactions.
pub async fn run(ctx: JobContext) -> Result<(), AppError> {
    let expired = TweetService::new(&ctx.db).expire(Utc::now()).await?;

    for tweet in &expired {
        // Fails for messages in archived threads, which are left as they are.
        if let Err(e) = ChannelId::new(tweet.channel_id)
            .delete_reactions(&ctx.http, MessageId::new(tweet.message_id))
            .await
        {
            tracing::debug!(
                "Could not clear reactions of expired tweet {}: {}",
                tweet.message_id,
                e
            );
        }
    }

    if !expired.is_empty() {
        tracing::info!("Expired {} queued tweets", expired.len());
    }

    Ok(())
}
