//! Error types and user-facing reply mapping.
//!
//! This module provides the bot's error hierarchy. `AppError` is the top-level error type
//! that wraps domain-specific errors. Command handlers turn it into a reply with
//! `AppError::user_message`, which exposes the message of user errors and hides the
//! details of everything else behind a generic reply while logging them.

pub mod config;
pub mod internal;

use dioxus_logger::tracing;
use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic error conversion. The message variants
/// (`NotFound`, `BadRequest`, `Forbidden`) carry text that is shown to the user verbatim.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Unexpected internal state such as a malformed stored id.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    ///
    /// Raised when calls to the Twitter API fail at the transport level.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Filesystem error, e.g. while reading the database file for a backup.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid command argument.
    ///
    /// # Fields
    /// - Message describing what was invalid about the arguments
    #[error("{0}")]
    BadRequest(String),

    /// The invoking member lacks the bot role or ownership the command needs.
    #[error("{0}")]
    Forbidden(String),

    /// Internal error with custom message.
    ///
    /// The provided message is logged but a generic message is shown to the user.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Converts the error into the text replied to the command invoker.
    ///
    /// User errors return their own message. Every other variant is logged with full
    /// details and replaced by a generic message to avoid leaking internals into chat.
    ///
    /// # Returns
    /// - Message for `NotFound`, `BadRequest` and `Forbidden`
    /// - `"An internal error occurred"` for all other variants
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::Forbidden(msg) => msg.clone(),
            err => {
                tracing::error!("{}", err);
                "An internal error occurred".to_string()
            }
        }
    }
}
