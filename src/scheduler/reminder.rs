use chrono::Utc;
use dioxus_logger::tracing;
use serenity::all::{ChannelId, CreateMessage};

use super::JobContext;
use crate::{error::AppError, model::reminder::NextRun, service::reminder::ReminderService};

/// Posts every due reminder, then reschedules or deletes it.
pub async fn run(ctx: JobContext) -> Result<(), AppError> {
    let now = Utc::now();
    let service = ReminderService::new(&ctx.db);

    for reminder in service.get_due(now).await? {
        let message = CreateMessage::new().content(format!(
            "<@{}> {}",
            reminder.author_id, reminder.content
        ));

        // A reminder whose channel is gone still advances, otherwise it fires every minute.
        if let Err(e) = ChannelId::new(reminder.channel_id)
            .send_message(&ctx.http, message)
            .await
        {
            tracing::warn!("Failed to post reminder {}: {}", reminder.id, e);
        }

        match service.complete_run(&reminder, now).await? {
            NextRun::Reschedule { at, .. } => {
                tracing::debug!("Reminder {} next runs at {}", reminder.id, at)
            }
            NextRun::Finished => tracing::info!("Reminder {} finished", reminder.id),
        }
    }

    Ok(())
}
