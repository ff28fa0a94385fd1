use dioxus_logger::tracing;
use serenity::all::{Context, Message};

use crate::{service::inactivity::InactivityService, state::BotState};

/// Records posts of watched members.
pub async fn handle_message(state: &BotState, _ctx: Context, message: Message) {
    // Only guild posts by people count as activity
    if message.guild_id.is_none() || message.author.bot {
        return;
    }

    let posted_at = message.timestamp.to_utc();

    match InactivityService::new(&state.db)
        .record_post(message.author.id.get(), posted_at)
        .await
    {
        Ok(true) => tracing::debug!("Recorded post by watched member {}", message.author.id),
        Ok(false) => {}
        Err(e) => tracing::error!("Failed to record post by {}: {}", message.author.id, e),
    }
}
