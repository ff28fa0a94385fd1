use chrono::FixedOffset;
use std::path::PathBuf;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_TIMEZONE_OFFSET_HOURS: i32 = 9;

pub struct Config {
    pub discord_bot_token: String,
    pub database_url: String,

    /// Channel receiving the hourly inactivity report.
    pub notify_channel_id: Option<u64>,
    /// Channel receiving the daily database backup.
    pub backup_channel_id: Option<u64>,

    pub tweet_guild_ids: Vec<u64>,
    pub tweet_approver_role_id: Option<u64>,
    /// Set only when all four Twitter credentials are configured.
    pub twitter_credentials: Option<TwitterCredentials>,

    /// Offset used to read and display local times.
    pub timezone: FixedOffset,
}

/// OAuth 1.0a user-context credentials of the account tweets are posted from.
#[derive(Clone)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

const TWITTER_VARS: [&str; 4] = [
    "TWITTER_CONSUMER_KEY",
    "TWITTER_CONSUMER_SECRET",
    "TWITTER_ACCESS_TOKEN",
    "TWITTER_ACCESS_TOKEN_SECRET",
];

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let timezone_hours = match optional_var("TIMEZONE_OFFSET_HOURS") {
            Some(value) => value.parse::<i32>().map_err(|e| ConfigError::InvalidEnvVar {
                name: "TIMEZONE_OFFSET_HOURS".to_string(),
                value: value.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_TIMEZONE_OFFSET_HOURS,
        };

        Ok(Self {
            discord_bot_token: required_var("DISCORD_BOT_TOKEN")?,
            database_url: required_var("DATABASE_URL")?,
            notify_channel_id: optional_id("NOTIFY_CHANNEL_ID")?,
            backup_channel_id: optional_id("BACKUP_CHANNEL_ID")?,
            tweet_guild_ids: parse_id_list(
                "TWEET_GUILD_IDS",
                &optional_var("TWEET_GUILD_IDS").unwrap_or_default(),
            )?,
            tweet_approver_role_id: optional_id("TWEET_APPROVER_ROLE_ID")?,
            twitter_credentials: twitter_credentials(TWITTER_VARS.map(optional_var))?,
            timezone: timezone_from_hours(timezone_hours)?,
        })
    }

    /// Filesystem path of the SQLite database, if `database_url` points at a file.
    pub fn sqlite_path(&self) -> Option<PathBuf> {
        sqlite_path_from_url(&self.database_url)
    }

    /// Whether tweet commands are accepted in `guild_id`.
    pub fn tweets_enabled_in(&self, guild_id: u64) -> bool {
        self.twitter_credentials.is_some() && self.tweet_guild_ids.contains(&guild_id)
    }
}

/// All four values configure the relay and none disables it. A partial set names the first missing variable.
fn twitter_credentials(
    values: [Option<String>; 4],
) -> Result<Option<TwitterCredentials>, ConfigError> {
    if values.iter().all(Option::is_none) {
        return Ok(None);
    }

    if let Some(index) = values.iter().position(Option::is_none) {
        return Err(ConfigError::MissingEnvVar(TWITTER_VARS[index].to_string()));
    }

    let [consumer_key, consumer_secret, access_token, access_token_secret] =
        values.map(Option::unwrap_or_default);

    Ok(Some(TwitterCredentials {
        consumer_key,
        consumer_secret,
        access_token,
        access_token_secret,
    }))
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads an optional variable, treating an empty value as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn optional_id(name: &str) -> Result<Option<u64>, ConfigError> {
    optional_var(name)
        .map(|value| parse_id(name, &value))
        .transpose()
}

/// Parses a Discord snowflake. Zero is rejected since serenity ids must be non-zero.
fn parse_id(name: &str, value: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason,
    };

    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid("id must not be 0".to_string())),
        Ok(id) => Ok(id),
        Err(e) => Err(invalid(e.to_string())),
    }
}

fn parse_id_list(name: &str, value: &str) -> Result<Vec<u64>, ConfigError> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| parse_id(name, part))
        .collect()
}

fn timezone_from_hours(hours: i32) -> Result<FixedOffset, ConfigError> {
    FixedOffset::east_opt(hours * 3600).ok_or_else(|| ConfigError::InvalidEnvVar {
        name: "TIMEZONE_OFFSET_HOURS".to_string(),
        value: hours.to_string(),
        reason: "offset must be between -23 and 23 hours".to_string(),
    })
}

fn sqlite_path_from_url(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        return None;
    }

    Some(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        let ids = parse_id_list("TWEET_GUILD_IDS", "1, 22 ,333").unwrap();
        assert_eq!(ids, vec![1, 22, 333]);
    }

    #[test]
    fn empty_id_list_is_empty() {
        assert!(parse_id_list("TWEET_GUILD_IDS", "").unwrap().is_empty());
        assert!(parse_id_list("TWEET_GUILD_IDS", " , ").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let err = parse_id_list("TWEET_GUILD_IDS", "1,abc").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { name, .. } if name == "TWEET_GUILD_IDS"));
    }

    #[test]
    fn rejects_zero_id() {
        assert!(parse_id("NOTIFY_CHANNEL_ID", "0").is_err());
    }

    #[test]
    fn twitter_needs_all_four_credentials() {
        assert!(twitter_credentials([None, None, None, None]).unwrap().is_none());

        let full = ["ck", "cs", "at", "ats"].map(|v| Some(v.to_string()));
        let credentials = twitter_credentials(full).unwrap().unwrap();
        assert_eq!(credentials.consumer_key, "ck");
        assert_eq!(credentials.access_token_secret, "ats");

        let partial = [Some("ck".to_string()), Some("cs".to_string()), None, None];
        let Err(err) = twitter_credentials(partial) else {
            panic!("partial credentials must be rejected");
        };
        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "TWITTER_ACCESS_TOKEN"));
    }

    #[test]
    fn converts_timezone_hours() {
        assert_eq!(timezone_from_hours(9).unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(timezone_from_hours(-5).unwrap().local_minus_utc(), -5 * 3600);
        assert!(timezone_from_hours(30).is_err());
    }

    #[test]
    fn extracts_sqlite_file_path() {
        assert_eq!(
            sqlite_path_from_url("sqlite://data/sagumo.db?mode=rwc"),
            Some(PathBuf::from("data/sagumo.db"))
        );
        assert_eq!(
            sqlite_path_from_url("sqlite:sagumo.db"),
            Some(PathBuf::from("sagumo.db"))
        );
        assert_eq!(sqlite_path_from_url("sqlite::memory:"), None);
        assert_eq!(sqlite_path_from_url("postgres://localhost/db"), None);
    }
}
