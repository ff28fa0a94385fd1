use chrono::Utc;
use dioxus_logger::tracing;
use serenity::all::{ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage};

use super::JobContext;
use crate::{
    error::AppError,
    model::inactive_member::INACTIVE_AFTER_DAYS,
    service::inactivity::InactivityService,
    util::time::format_local,
};

const INACTIVE_COLOR: u32 = 0xe67e22;
const MAX_REPORTED: usize = 40;

/// Marks members idle for too long and reports them to the notification channel.
pub async fn run(ctx: JobContext) -> Result<(), AppError> {
    let members = InactivityService::new(&ctx.db).sweep(Utc::now()).await?;
    if members.is_empty() {
        return Ok(());
    }

    tracing::info!("{} members became inactive", members.len());

    let Some(channel_id) = ctx.config.notify_channel_id else {
        return Ok(());
    };

    let lines = members
        .iter()
        .take(MAX_REPORTED)
        .map(|m| {
            format!(
                "<@{}> last active {}",
                m.user_id,
                format_local(m.last_active(), &ctx.config.timezone)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut embed = CreateEmbed::new()
        .title(format!("No activity for {} days", INACTIVE_AFTER_DAYS))
        .description(lines)
        .color(INACTIVE_COLOR);
    if members.len() > MAX_REPORTED {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "and {} more",
            members.len() - MAX_REPORTED
        )));
    }

    ChannelId::new(channel_id)
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}
