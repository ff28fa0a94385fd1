use chrono::Utc;
use dioxus_logger::tracing;

use super::JobContext;
use crate::{error::AppError, service::polling::PollingService};

/// Forgets polls nobody closed.
pub async fn run(ctx: JobContext) -> Result<(), AppError> {
    let purged = PollingService::new(&ctx.db)
        .purge_expired(Utc::now())
        .await?;

    if purged > 0 {
        tracing::info!("Removed {} expired polls", purged);
    }

    Ok(())
}
