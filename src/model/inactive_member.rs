use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;

/// Days without posts or reactions after which a watched member counts as inactive.
pub const INACTIVE_AFTER_DAYS: i64 = 90;

/// A member watched for inactivity.
#[derive(Debug, Clone, PartialEq)]
pub struct InactiveMember {
    pub user_id: u64,
    pub last_posted: DateTime<Utc>,
    pub last_react: DateTime<Utc>,
    /// Set once the member has been reported as inactive.
    pub notified: bool,
}

impl InactiveMember {
    pub fn from_entity(entity: entity::inactive_member::Model) -> Result<Self, DbErr> {
        let user_id = entity
            .user_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse user_id: {}", e)))?;

        Ok(Self {
            user_id,
            last_posted: entity.last_posted,
            last_react: entity.last_react,
            notified: entity.notified,
        })
    }

    /// Most recent activity of either kind.
    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_posted.max(self.last_react)
    }
}

/// Cutoff before which both activity timestamps must lie for a member to be inactive.
pub fn inactivity_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(INACTIVE_AFTER_DAYS)
}
