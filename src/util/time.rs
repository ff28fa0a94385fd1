use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serenity::all::Timestamp;

use crate::error::{internal::InternalError, AppError};

/// Input format accepted for local times, e.g. `2026-10-16 21:30`.
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses a local `YYYY-MM-DD HH:MM` time in `offset` into UTC.
///
/// # Returns
/// - `Some(DateTime<Utc>)` - The instant the local time denotes
/// - `None` - The input does not match `LOCAL_INPUT_FORMAT`
pub fn parse_local_datetime(input: &str, offset: &FixedOffset) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(input.trim(), LOCAL_INPUT_FORMAT).ok()?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Formats a UTC instant as local `YYYY-MM-DD HH:MM`.
pub fn format_local(at: DateTime<Utc>, offset: &FixedOffset) -> String {
    at.with_timezone(offset).format(LOCAL_INPUT_FORMAT).to_string()
}

/// Converts a UTC datetime into a Discord embed timestamp.
pub fn to_discord_timestamp(at: DateTime<Utc>) -> Result<Timestamp, AppError> {
    Timestamp::from_unix_timestamp(at.timestamp()).map_err(|e| {
        InternalError::InvalidDiscordTimestamp {
            timestamp: at.timestamp(),
            reason: e.to_string(),
        }
        .into()
    })
}
