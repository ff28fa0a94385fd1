use chrono::FixedOffset;

use super::JobContext;
use crate::{error::AppError, service::backup::send_backup};

/// Local time of the daily backup.
const BACKUP_HOUR: i32 = 4;
const BACKUP_MINUTE: i32 = 5;

/// Cron expression firing at 04:05 in `timezone`. The scheduler runs in UTC.
pub fn daily_schedule(timezone: &FixedOffset) -> String {
    let offset_minutes = timezone.local_minus_utc() / 60;
    let utc_minutes = (BACKUP_HOUR * 60 + BACKUP_MINUTE - offset_minutes).rem_euclid(24 * 60);

    format!("0 {} {} * * *", utc_minutes % 60, utc_minutes / 60)
}

/// Uploads the database file to the backup channel.
pub async fn run(ctx: JobContext) -> Result<(), AppError> {
    let (Some(channel_id), Some(path)) = (ctx.config.backup_channel_id, ctx.config.sqlite_path())
    else {
        return Ok(());
    };

    send_backup(&ctx.http, channel_id, &path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_local_backup_time_to_utc() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let est = FixedOffset::west_opt(5 * 3600).unwrap();

        assert_eq!(daily_schedule(&utc), "0 5 4 * * *");
        assert_eq!(daily_schedule(&jst), "0 5 19 * * *");
        assert_eq!(daily_schedule(&ist), "0 35 22 * * *");
        assert_eq!(daily_schedule(&est), "0 5 9 * * *");
    }
}
