//! Watching members for long inactivity.

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    data::inactive_member::InactiveMemberRepository,
    error::AppError,
    model::inactive_member::{inactivity_cutoff, InactiveMember},
};

pub struct InactivityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InactivityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Starts watching the given members and returns how many were newly registered.
    pub async fn register(&self, user_ids: &[u64], now: DateTime<Utc>) -> Result<u64, AppError> {
        let registered = InactiveMemberRepository::new(self.db)
            .register_many(user_ids, now)
            .await?;

        tracing::info!("Registered {} of {} members for watching", registered, user_ids.len());

        Ok(registered)
    }

    /// Stops watching a member.
    ///
    /// # Returns
    /// - `Ok(())` - The member is no longer watched
    /// - `Err(AppError::NotFound)` - The member was not registered
    pub async fn unregister(&self, user_id: u64) -> Result<(), AppError> {
        if InactiveMemberRepository::new(self.db).delete(user_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("<@{}> is not registered", user_id)))
        }
    }

    pub async fn activate(&self, user_ids: &[u64], now: DateTime<Utc>) -> Result<u64, AppError> {
        Ok(InactiveMemberRepository::new(self.db)
            .activate(user_ids, now)
            .await?)
    }

    pub async fn inactivate(&self, user_ids: &[u64]) -> Result<u64, AppError> {
        Ok(InactiveMemberRepository::new(self.db)
            .set_notified(user_ids, true)
            .await?)
    }

    /// Watched members by notified flag: `false` lists active members, `true` inactive ones.
    pub async fn list(&self, notified: bool) -> Result<Vec<InactiveMember>, AppError> {
        Ok(InactiveMemberRepository::new(self.db)
            .get_by_notified(notified)
            .await?)
    }

    /// Records a post. Unwatched members are ignored.
    pub async fn record_post(&self, user_id: u64, at: DateTime<Utc>) -> Result<bool, AppError> {
        Ok(InactiveMemberRepository::new(self.db)
            .touch_posted(user_id, at)
            .await?)
    }

    /// Records a reaction added or removed. Unwatched members are ignored.
    pub async fn record_reaction(&self, user_id: u64, at: DateTime<Utc>) -> Result<bool, AppError> {
        Ok(InactiveMemberRepository::new(self.db)
            .touch_react(user_id, at)
            .await?)
    }

    /// Finds members that just crossed the inactivity threshold and marks them notified.
    ///
    /// Members returned here are not returned again until they become active.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<Vec<InactiveMember>, AppError> {
        let repo = InactiveMemberRepository::new(self.db);
        let inactive = repo.get_inactive_since(inactivity_cutoff(now)).await?;

        let ids: Vec<u64> = inactive.iter().map(|m| m.user_id).collect();
        repo.set_notified(&ids, true).await?;

        Ok(inactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inactive_member::INACTIVE_AFTER_DAYS;
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory::inactive_member::InactiveMemberFactory};

    #[tokio::test]
    async fn sweep_reports_each_member_once() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::InactiveMember)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let now = Utc::now();
        let long_ago = now - Duration::days(INACTIVE_AFTER_DAYS + 1);
        InactiveMemberFactory::new(db, "1")
            .last_posted(long_ago)
            .last_react(long_ago)
            .build()
            .await?;
        InactiveMemberFactory::new(db, "2")
            .last_posted(long_ago)
            .last_react(now)
            .build()
            .await?;

        let service = InactivityService::new(db);

        let reported = service.sweep(now).await?;
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].user_id, 1);

        assert!(service.sweep(now).await?.is_empty());
        assert_eq!(service.list(true).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn activity_clears_notified() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::InactiveMember)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        InactiveMemberFactory::new(db, "1").notified(true).build().await?;

        let service = InactivityService::new(db);

        assert!(service.record_post(1, Utc::now()).await?);
        assert!(!service.record_post(2, Utc::now()).await?);
        assert!(service.list(true).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn unregister_unknown_member_is_not_found() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::InactiveMember)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = InactivityService::new(db);
        assert_eq!(service.register(&[1, 2], Utc::now()).await?, 2);
        assert_eq!(service.register(&[2, 3], Utc::now()).await?, 1);

        service.unregister(1).await?;
        assert!(matches!(
            service.unregister(1).await,
            Err(AppError::NotFound(_))
        ));

        Ok(())
    }
}
