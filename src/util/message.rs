use dioxus_logger::tracing;
use serenity::{
    all::{ChannelId, CreateMessage, ReactionType},
    http::Http,
};
use std::{sync::Arc, time::Duration};

/// Seconds a warning stays visible before the bot deletes it.
pub const WARNING_LIFETIME_SECS: u64 = 5;

/// Builds a jump link to a guild message.
pub fn message_url(guild_id: u64, channel_id: u64, message_id: u64) -> String {
    format!(
        "https://discord.com/channels/{}/{}/{}",
        guild_id, channel_id, message_id
    )
}

/// Name of a reaction emoji: the character itself for unicode, the name for custom emoji.
pub fn emoji_name(emoji: &ReactionType) -> String {
    match emoji {
        ReactionType::Unicode(value) => value.clone(),
        ReactionType::Custom { name, id, .. } => {
            name.clone().unwrap_or_else(|| id.to_string())
        }
        _ => String::new(),
    }
}

/// Posts `content` to `channel_id` and deletes it after `WARNING_LIFETIME_SECS`.
///
/// Deletion runs in a background task so the caller does not wait for it. Failures are
/// only logged since the warning is best effort.
pub async fn send_transient_warning(http: Arc<Http>, channel_id: ChannelId, content: String) {
    let message = match channel_id
        .send_message(&http, CreateMessage::new().content(content))
        .await
    {
        Ok(message) => message,
        Err(e) => {
            tracing::error!("Failed to post warning in channel {}: {}", channel_id, e);
            return;
        }
    };

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(WARNING_LIFETIME_SECS)).await;
        if let Err(e) = message.delete(&http).await {
            tracing::debug!("Failed to delete warning {}: {}", message.id, e);
        }
    });
}
