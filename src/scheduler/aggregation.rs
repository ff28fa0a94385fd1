use chrono::Utc;
use dioxus_logger::tracing;
use serenity::all::{ChannelId, CreateMessage};

use super::JobContext;
use crate::{
    error::AppError,
    model::reaction_aggregation::ReactionAggregation,
    service::reaction_aggregation::{
        ReactionAggregationService, EXPIRE_AFTER_DAYS, REMIND_AFTER_DAYS,
    },
    util::message::message_url,
};

/// Expires old aggregations, reminds stale ones and drops completed ones.
pub async fn run(ctx: JobContext) -> Result<(), AppError> {
    let now = Utc::now();
    let service = ReactionAggregationService::new(&ctx.db);

    for aggregation in service.expire(now).await? {
        tracing::info!("Aggregation {} expired", aggregation.message_id);
        let content = format!(
            "<@{}> This aggregation closed after {} days without reaching its target ({})\n{}",
            aggregation.author_id,
            EXPIRE_AFTER_DAYS,
            aggregation.progress_label(),
            link(&aggregation)
        );
        post(&ctx, &aggregation, content).await;
    }

    for aggregation in service.claim_stale(now).await? {
        let content = format!(
            "This aggregation has been open for {} days ({})\n{}",
            REMIND_AFTER_DAYS,
            aggregation.progress_label(),
            link(&aggregation)
        );
        post(&ctx, &aggregation, content).await;
    }

    let purged = service.purge_notified(now).await?;
    if purged > 0 {
        tracing::debug!("Removed {} completed aggregations", purged);
    }

    Ok(())
}

fn link(aggregation: &ReactionAggregation) -> String {
    message_url(
        aggregation.guild_id,
        aggregation.channel_id,
        aggregation.message_id,
    )
}

/// Posts to the aggregation's channel. A failed post does not stop the pass.
async fn post(ctx: &JobContext, aggregation: &ReactionAggregation, content: String) {
    if let Err(e) = ChannelId::new(aggregation.channel_id)
        .send_message(&ctx.http, CreateMessage::new().content(content))
        .await
    {
        tracing::warn!(
            "Failed to post notice for aggregation {}: {}",
            aggregation.message_id,
            e
        );
    }
}
