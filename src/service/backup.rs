//! Uploads the SQLite database file to a Discord channel.

use chrono::Utc;
use std::path::Path;
use dioxus_logger::tracing;
use serenity::{
    all::{ChannelId, CreateAttachment, CreateMessage},
    http::Http,
};

use crate::error::AppError;

/// Discord rejects attachments above this size for bots without boosts.
pub const MAX_ATTACHMENT_BYTES: u64 = 25 * 1024 * 1024;

/// Posts the database file to `channel_id`.
///
/// # Returns
/// - `Ok(())` - The file was uploaded
/// - `Err(AppError::BadRequest)` - The file is larger than an attachment may be
/// - `Err(AppError::IoErr)` - The file could not be read
/// - `Err(AppError::DiscordErr)` - The upload failed
pub async fn send_backup(http: &Http, channel_id: u64, path: &Path) -> Result<(), AppError> {
    let size = tokio::fs::metadata(path).await?.len();
    if size > MAX_ATTACHMENT_BYTES {
        return Err(AppError::BadRequest(format!(
            "Database file is {} bytes, too large to upload",
            size
        )));
    }

    let attachment = CreateAttachment::path(path).await?;
    let message = CreateMessage::new()
        .content(format!("Backup {}", Utc::now().format("%Y-%m-%d %H:%M UTC")))
        .add_file(attachment);

    ChannelId::new(channel_id)
        .send_message(http, message)
        .await?;

    tracing::info!("Uploaded database backup ({} bytes) to channel {}", size, channel_id);

    Ok(())
}
