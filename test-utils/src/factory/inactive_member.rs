//! Inactive member factory for creating watched member rows.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating watched members with customizable activity times.
pub struct InactiveMemberFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    last_posted: DateTime<Utc>,
    last_react: DateTime<Utc>,
    notified: bool,
}

impl<'a> InactiveMemberFactory<'a> {
    /// Creates a factory for `user_id` that was active just now and is not notified.
    pub fn new(db: &'a DatabaseConnection, user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            db,
            user_id: user_id.into(),
            last_posted: now,
            last_react: now,
            notified: false,
        }
    }

    pub fn last_posted(mut self, last_posted: DateTime<Utc>) -> Self {
        self.last_posted = last_posted;
        self
    }

    pub fn last_react(mut self, last_react: DateTime<Utc>) -> Self {
        self.last_react = last_react;
        self
    }

    pub fn notified(mut self, notified: bool) -> Self {
        self.notified = notified;
        self
    }

    /// Builds and inserts the watched member into the database.
    pub async fn build(self) -> Result<entity::inactive_member::Model, DbErr> {
        entity::inactive_member::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            last_posted: ActiveValue::Set(self.last_posted),
            last_react: ActiveValue::Set(self.last_react),
            notified: ActiveValue::Set(self.notified),
        }
        .insert(self.db)
        .await
    }
}

/// Registers `user_id` as a watched member that was active just now.
pub async fn create_inactive_member(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<entity::inactive_member::Model, DbErr> {
    InactiveMemberFactory::new(db, user_id).build().await
}
