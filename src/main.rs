mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use dioxus_logger::tracing::{self, Level};
use std::sync::Arc;

use crate::{config::Config, error::AppError, state::BotState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    dioxus_logger::init(Level::INFO)
        .map_err(|e| AppError::InternalError(format!("Failed to initialize logger: {}", e)))?;

    let config = Arc::new(Config::from_env()?);

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;

    if config.twitter_credentials.is_none() {
        tracing::info!("Twitter credentials are not set, tweet relay disabled");
    }

    let state = BotState::new(db.clone(), config.clone(), http_client);
    let (bot_client, discord_http) = bot::start::init_bot(state).await?;

    // Start periodic jobs
    let scheduler_db = db.clone();
    let scheduler_http = discord_http.clone();
    let scheduler_config = config.clone();
    tokio::spawn(async move {
        if let Err(e) =
            scheduler::start_scheduler(scheduler_db, scheduler_http, scheduler_config).await
        {
            tracing::error!("Scheduler error: {}", e);
        }
    });

    bot::start::start_bot(bot_client).await
}
