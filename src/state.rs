//! State shared by every event handler and command.
//!
//! `BotState` is built once at startup and cloned into the serenity event handler. It
//! holds the database pool, the loaded configuration and, when Twitter credentials
//! are configured, the Twitter client used by the tweet relay.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::{config::Config, service::twitter::TwitterClient};

#[derive(Clone)]
pub struct BotState {
    /// Database connection pool
    pub db: DatabaseConnection,

    pub config: Arc<Config>,

    /// `None` when the Twitter credentials are unset, which disables the tweet relay.
    pub twitter: Option<TwitterClient>,
}

impl BotState {
    /// Creates the shared state, building a Twitter client only when credentials are configured.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Loaded configuration
    /// - `http_client` - HTTP client for the Twitter API
    pub fn new(db: DatabaseConnection, config: Arc<Config>, http_client: reqwest::Client) -> Self {
        let twitter = config
            .twitter_credentials
            .clone()
            .map(|credentials| TwitterClient::new(http_client, credentials));

        Self {
            db,
            config,
            twitter,
        }
    }
}
