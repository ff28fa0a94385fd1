//! Periodic jobs run by `tokio-cron-scheduler`.
//!
//! Each submodule owns one job: a `run` function doing a single pass and returning
//! `Result<(), AppError>`. `start_scheduler` wraps them in cron jobs that log failures
//! instead of stopping the scheduler.

pub mod aggregation;
pub mod backup;
pub mod inactivity;
pub mod polling;
pub mod reminder;
pub mod tweet;

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::{future::Future, sync::Arc};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::{config::Config, error::AppError};

const EVERY_MINUTE: &str = "0 * * * * *";
const EVERY_HOUR: &str = "0 0 * * * *";
const EVERY_12_HOURS: &str = "0 0 */12 * * *";

/// Resources handed to every job run.
#[derive(Clone)]
pub struct JobContext {
    pub db: DatabaseConnection,
    pub http: Arc<Http>,
    pub config: Arc<Config>,
}

/// Starts every periodic job.
///
/// # Arguments
/// - `db` - Database connection
/// - `http` - Discord HTTP client used to post notices
/// - `config` - Loaded configuration (notification channels, timezone)
pub async fn start_scheduler(
    db: DatabaseConnection,
    http: Arc<Http>,
    config: Arc<Config>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;
    let ctx = JobContext { db, http, config };

    scheduler
        .add(periodic(EVERY_MINUTE, "aggregation", ctx.clone(), aggregation::run)?)
        .await?;
    scheduler
        .add(periodic(EVERY_MINUTE, "reminder", ctx.clone(), reminder::run)?)
        .await?;
    scheduler
        .add(periodic(EVERY_HOUR, "inactivity", ctx.clone(), inactivity::run)?)
        .await?;
    scheduler
        .add(periodic(EVERY_12_HOURS, "polling", ctx.clone(), polling::run)?)
        .await?;
    scheduler
        .add(periodic(EVERY_12_HOURS, "tweet", ctx.clone(), tweet::run)?)
        .await?;

    if ctx.config.backup_channel_id.is_some() && ctx.config.sqlite_path().is_some() {
        let schedule = backup::daily_schedule(&ctx.config.timezone);
        scheduler
            .add(periodic(&schedule, "backup", ctx.clone(), backup::run)?)
            .await?;
    } else {
        tracing::info!("Daily backup disabled, BACKUP_CHANNEL_ID or a SQLite database is missing");
    }

    scheduler.start().await?;

    tracing::info!("Scheduler started");

    Ok(())
}

/// Wraps a job pass in a cron job that logs its errors.
fn periodic<F, Fut>(
    schedule: &str,
    name: &'static str,
    ctx: JobContext,
    task: F,
) -> Result<Job, JobSchedulerError>
where
    F: Fn(JobContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), AppError>> + Send + 'static,
{
    let task = Arc::new(task);

    Job::new_async(schedule, move |_uuid, _lock| {
        let ctx = ctx.clone();
        let task = task.clone();

        Box::pin(async move {
            if let Err(e) = task(ctx).await {
                tracing::error!("Error running {} job: {}", name, e);
            }
        })
    })
}
