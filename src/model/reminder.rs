//! Domain models for scheduled reminders.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;

/// A reminder waiting for its next run.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub content: String,
    pub next_run_at: DateTime<Utc>,
    /// Minutes between runs; `None` for a one-shot reminder.
    pub interval_minutes: Option<i32>,
    /// Runs left including the next one; `None` repeats forever.
    pub remaining: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// What happens to a reminder after it has fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextRun {
    /// Fire again at `at` with `remaining` runs left.
    Reschedule {
        at: DateTime<Utc>,
        remaining: Option<i32>,
    },
    /// No runs left; the reminder is removed.
    Finished,
}

impl Reminder {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::reminder::Model) -> Result<Self, DbErr> {
        let parse = |field: &str, value: &str| {
            value
                .parse::<u64>()
                .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
        };

        Ok(Self {
            id: entity.id,
            guild_id: parse("guild_id", &entity.guild_id)?,
            channel_id: parse("channel_id", &entity.channel_id)?,
            author_id: parse("author_id", &entity.author_id)?,
            content: entity.content,
            next_run_at: entity.next_run_at,
            interval_minutes: entity.interval_minutes,
            remaining: entity.remaining,
            created_at: entity.created_at,
        })
    }

    /// Computes the schedule after the reminder fired at `now`.
    ///
    /// Slots missed while the bot was offline are skipped rather than replayed, so the
    /// next run is the first slot strictly after `now`. Only the run that actually fired
    /// consumes `remaining`.
    pub fn next_run(&self, now: DateTime<Utc>) -> NextRun {
        let Some(interval) = self.interval_minutes.filter(|m| *m > 0) else {
            return NextRun::Finished;
        };

        let remaining = match self.remaining {
            Some(n) if n <= 1 => return NextRun::Finished,
            Some(n) => Some(n - 1),
            None => None,
        };

        let step = Duration::minutes(interval as i64);
        let mut at = self.next_run_at + step;
        if at <= now {
            let behind = (now - at).num_minutes() / interval as i64 + 1;
            at += step * behind as i32;
        }

        NextRun::Reschedule { at, remaining }
    }
}

/// Parameters for creating a reminder.
#[derive(Debug, Clone)]
pub struct CreateReminderParam {
    pub guild_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub content: String,
    pub first_run_at: DateTime<Utc>,
    pub interval_minutes: Option<i32>,
    /// Total number of runs; `None` repeats forever.
    pub repeat: Option<i32>,
}

impl CreateReminderParam {
    /// Normalizes the `every_minutes` and `repeat` command options.
    ///
    /// Without an interval the reminder fires once. With an interval, a missing or zero
    /// `repeat` means forever.
    ///
    /// # Returns
    /// - `Ok((interval_minutes, repeat))` - Values to store
    /// - `Err(String)` - Negative interval or repeat
    pub fn schedule_from_options(
        every_minutes: Option<i64>,
        repeat: Option<i64>,
    ) -> Result<(Option<i32>, Option<i32>), String> {
        match every_minutes {
            None => Ok((None, Some(1))),
            Some(m) if m <= 0 || m > i32::MAX as i64 => {
                Err("every_minutes must be a positive number".to_string())
            }
            Some(m) => match repeat {
                None | Some(0) => Ok((Some(m as i32), None)),
                Some(r) if r < 0 || r > i32::MAX as i64 => {
                    Err("repeat must be 0 or a positive number".to_string())
                }
                Some(r) => Ok((Some(m as i32), Some(r as i32))),
            },
        }
    }
}
