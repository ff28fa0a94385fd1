//! Reaction aggregation state machine.
//!
//! Reaction events arrive asynchronously and possibly out of order. Every transition is a
//! single atomic counter update followed by a re-read, and completion is claimed through
//! a conditional update on `notified_at`, so concurrent events can neither lose counts
//! nor post the completion notice twice.

use chrono::{DateTime, Duration, Utc};
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    data::reaction_aggregation::ReactionAggregationRepository,
    error::AppError,
    model::reaction_aggregation::{
        CreateReactionAggregationParam, ReactionAggregation, ReactionKind,
    },
};

/// Open aggregations get one reminder once they are this old.
pub const REMIND_AFTER_DAYS: i64 = 3;
/// Completed aggregations are removed this long after their notice.
pub const CLEANUP_AFTER_HOURS: i64 = 1;
/// Aggregations are removed unconditionally at this age.
pub const EXPIRE_AFTER_DAYS: i64 = 14;

/// A reaction on some message, reduced to what the aggregation needs.
#[derive(Debug, Clone, Copy)]
pub struct ReactionEvent<'a> {
    pub message_id: u64,
    pub user_id: u64,
    pub role_ids: &'a [u64],
    pub emoji_name: &'a str,
}

/// What the bot has to do after a reaction event.
#[derive(Debug, Clone, PartialEq)]
pub enum ReactionOutcome {
    /// The message is not an aggregation.
    Untracked,
    /// The reactor may not contribute; their reaction must be removed with a warning.
    Rejected(ReactionAggregation),
    /// The event was dropped without touching the counters.
    Ignored,
    /// A counter moved.
    Updated {
        /// State after the update.
        aggregation: ReactionAggregation,
        kind: ReactionKind,
        /// True when this event claimed the completion notice.
        completed: bool,
    },
}

pub struct ReactionAggregationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReactionAggregationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Starts an aggregation.
    ///
    /// # Returns
    /// - `Ok(ReactionAggregation)` - The stored aggregation
    /// - `Err(AppError::BadRequest)` - Target is not positive
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(
        &self,
        param: CreateReactionAggregationParam,
    ) -> Result<ReactionAggregation, AppError> {
        if param.target_value <= 0 {
            return Err(AppError::BadRequest(
                "The target must be greater than 0".to_string(),
            ));
        }

        let aggregation = ReactionAggregationRepository::new(self.db)
            .create(param)
            .await?;

        tracing::info!(
            "Started aggregation {} in guild {} (target {})",
            aggregation.message_id,
            aggregation.guild_id,
            aggregation.target_value
        );

        Ok(aggregation)
    }

    /// Applies an added reaction.
    ///
    /// Unpermitted reactors are rejected without touching the counters. Matte reactions
    /// raise the pause counter and every other emoji raises the sum, after which the
    /// completion rule is evaluated.
    pub async fn handle_add(
        &self,
        event: ReactionEvent<'_>,
        now: DateTime<Utc>,
    ) -> Result<ReactionOutcome, AppError> {
        let repo = ReactionAggregationRepository::new(self.db);

        let Some(aggregation) = repo.find_by_message_id(event.message_id).await? else {
            return Ok(ReactionOutcome::Untracked);
        };

        if !aggregation.permits(event.user_id, event.role_ids) {
            return Ok(ReactionOutcome::Rejected(aggregation));
        }

        let kind = ReactionKind::from_emoji_name(event.emoji_name);
        if !repo.increment(event.message_id, kind).await? {
            // Deleted between the lookup and the update.
            return Ok(ReactionOutcome::Untracked);
        }

        self.judge(event.message_id, kind, now).await
    }

    /// Applies a withdrawn reaction.
    ///
    /// Removals by unpermitted members are ignored since their reaction never counted.
    /// Counters never drop below zero.
    pub async fn handle_remove(
        &self,
        event: ReactionEvent<'_>,
        now: DateTime<Utc>,
    ) -> Result<ReactionOutcome, AppError> {
        let repo = ReactionAggregationRepository::new(self.db);

        let Some(aggregation) = repo.find_by_message_id(event.message_id).await? else {
            return Ok(ReactionOutcome::Untracked);
        };

        if !aggregation.permits(event.user_id, event.role_ids) {
            return Ok(ReactionOutcome::Ignored);
        }

        let kind = ReactionKind::from_emoji_name(event.emoji_name);
        if !repo.decrement(event.message_id, kind).await? {
            return Ok(ReactionOutcome::Ignored);
        }

        self.judge(event.message_id, kind, now).await
    }

    /// Re-reads the aggregation and claims the completion notice when due.
    async fn judge(
        &self,
        message_id: u64,
        kind: ReactionKind,
        now: DateTime<Utc>,
    ) -> Result<ReactionOutcome, AppError> {
        let repo = ReactionAggregationRepository::new(self.db);

        let Some(mut aggregation) = repo.find_by_message_id(message_id).await? else {
            return Ok(ReactionOutcome::Untracked);
        };

        let completed = aggregation.is_complete() && repo.mark_notified(message_id, now).await?;
        if completed {
            aggregation.notified_at = Some(now);
            tracing::info!("Aggregation {} reached its target", message_id);
        }

        Ok(ReactionOutcome::Updated {
            aggregation,
            kind,
            completed,
        })
    }

    pub async fn list(&self, guild_id: u64) -> Result<Vec<ReactionAggregation>, AppError> {
        Ok(ReactionAggregationRepository::new(self.db)
            .get_open_by_guild_id(guild_id)
            .await?)
    }

    /// Deletes one aggregation of the guild.
    ///
    /// # Returns
    /// - `Ok(ReactionAggregation)` - The deleted aggregation
    /// - `Err(AppError::NotFound)` - No aggregation with that id in this guild
    pub async fn remove(&self, guild_id: u64, message_id: u64) -> Result<ReactionAggregation, AppError> {
        let repo = ReactionAggregationRepository::new(self.db);

        let aggregation = repo
            .find_by_message_id(message_id)
            .await?
            .filter(|a| a.guild_id == guild_id)
            .ok_or_else(|| AppError::NotFound(format!("No aggregation with id {}", message_id)))?;

        repo.delete(message_id).await?;

        Ok(aggregation)
    }

    /// Deletes every aggregation of the guild and returns how many were removed.
    pub async fn clear(&self, guild_id: u64) -> Result<u64, AppError> {
        Ok(ReactionAggregationRepository::new(self.db)
            .delete_by_guild_id(guild_id)
            .await?)
    }

    /// Claims the open aggregations that are due for their single reminder.
    ///
    /// Aggregations claimed here will not be returned again.
    pub async fn claim_stale(&self, now: DateTime<Utc>) -> Result<Vec<ReactionAggregation>, AppError> {
        let repo = ReactionAggregationRepository::new(self.db);
        let candidates = repo
            .get_needing_reminder(now - Duration::days(REMIND_AFTER_DAYS))
            .await?;

        let mut claimed = Vec::new();
        for aggregation in candidates {
            if repo.mark_reminded(aggregation.message_id).await? {
                claimed.push(aggregation);
            }
        }

        Ok(claimed)
    }

    /// Deletes aggregations whose completion notice is older than the cleanup delay.
    pub async fn purge_notified(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        Ok(ReactionAggregationRepository::new(self.db)
            .delete_notified_before(now - Duration::hours(CLEANUP_AFTER_HOURS))
            .await?)
    }

    /// Deletes open aggregations past the hard expiry and returns them for the expiry notice.
    ///
    /// Completed aggregations are left to `purge_notified`, so they never get an expiry notice.
    pub async fn expire(&self, now: DateTime<Utc>) -> Result<Vec<ReactionAggregation>, AppError> {
        let repo = ReactionAggregationRepository::new(self.db);
        let candidates = repo
            .get_open_created_before(now - Duration::days(EXPIRE_AFTER_DAYS))
            .await?;

        let mut expired = Vec::new();
        for aggregation in candidates {
            if repo.delete(aggregation.message_id).await? {
                expired.push(aggregation);
            }
        }

        Ok(expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::prelude::ReactionAggregation as ReactionAggregationEntity;
    use test_utils::{builder::TestBuilder, factory::reaction_aggregation::ReactionAggregationFactory};

    fn event<'a>(message_id: u64, user_id: u64, role_ids: &'a [u64], emoji: &'a str) -> ReactionEvent<'a> {
        ReactionEvent {
            message_id,
            user_id,
            role_ids,
            emoji_name: emoji,
        }
    }

    #[tokio::test]
    async fn completes_once_at_target() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(ReactionAggregationEntity)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        ReactionAggregationFactory::new(db)
            .message_id("10")
            .target_value(2)
            .build()
            .await?;

        let service = ReactionAggregationService::new(db);
        let now = Utc::now();

        let first = service.handle_add(event(10, 1, &[], "👍"), now).await?;
        assert!(matches!(first, ReactionOutcome::Updated { completed: false, .. }));

        let second = service.handle_add(event(10, 2, &[], "🎉"), now).await?;
        let ReactionOutcome::Updated { aggregation, completed, .. } = second else {
            panic!("expected an update");
        };
        assert!(completed);
        assert_eq!(aggregation.sum, 2);
        assert!(aggregation.notified_at.is_some());

        // Further reactions never re-notify.
        let third = service.handle_add(event(10, 3, &[], "👍"), now).await?;
        assert!(matches!(third, ReactionOutcome::Updated { completed: false, .. }));

        Ok(())
    }

    #[tokio::test]
    async fn matte_pauses_until_withdrawn() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(ReactionAggregationEntity)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        ReactionAggregationFactory::new(db)
            .message_id("10")
            .target_value(1)
            .build()
            .await?;

        let service = ReactionAggregationService::new(db);
        let now = Utc::now();

        let paused = service.handle_add(event(10, 1, &[], "matte"), now).await?;
        assert!(matches!(
            paused,
            ReactionOutcome::Updated { kind: ReactionKind::Matte, completed: false, .. }
        ));

        let counted = service.handle_add(event(10, 2, &[], "👍"), now).await?;
        assert!(matches!(counted, ReactionOutcome::Updated { completed: false, .. }));

        let resumed = service.handle_remove(event(10, 1, &[], "matte"), now).await?;
        let ReactionOutcome::Updated { aggregation, kind, completed } = resumed else {
            panic!("expected an update");
        };
        assert_eq!(kind, ReactionKind::Matte);
        assert!(completed);
        assert_eq!(aggregation.matte, 0);

        Ok(())
    }

    #[tokio::test]
    async fn rejects_unpermitted_reactor_without_counting() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(ReactionAggregationEntity)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        ReactionAggregationFactory::new(db)
            .message_id("10")
            .allowed_ids("50")
            .build()
            .await?;

        let service = ReactionAggregationService::new(db);
        let now = Utc::now();

        let outcome = service.handle_add(event(10, 1, &[60], "👍"), now).await?;
        assert!(matches!(outcome, ReactionOutcome::Rejected(_)));

        let removal = service.handle_remove(event(10, 1, &[60], "👍"), now).await?;
        assert_eq!(removal, ReactionOutcome::Ignored);

        let permitted = service.handle_add(event(10, 2, &[50], "👍"), now).await?;
        let ReactionOutcome::Updated { aggregation, .. } = permitted else {
            panic!("expected an update");
        };
        assert_eq!(aggregation.sum, 1);

        Ok(())
    }

    #[tokio::test]
    async fn removal_without_prior_add_keeps_counters_at_zero() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(ReactionAggregationEntity)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        ReactionAggregationFactory::new(db).message_id("10").build().await?;

        let service = ReactionAggregationService::new(db);
        let outcome = service
            .handle_remove(event(10, 1, &[], "👍"), Utc::now())
            .await?;

        assert_eq!(outcome, ReactionOutcome::Ignored);

        Ok(())
    }

    #[tokio::test]
    async fn untracked_messages_are_ignored() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(ReactionAggregationEntity)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ReactionAggregationService::new(db);
        let outcome = service.handle_add(event(99, 1, &[], "👍"), Utc::now()).await?;

        assert_eq!(outcome, ReactionOutcome::Untracked);

        Ok(())
    }

    #[tokio::test]
    async fn rejects_non_positive_target() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(ReactionAggregationEntity)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ReactionAggregationService::new(db);
        let result = service
            .create(CreateReactionAggregationParam {
                message_id: 1,
                guild_id: 2,
                channel_id: 3,
                command_message_id: 1,
                target_value: 0,
                author_id: 4,
                allowed_ids: vec![],
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }

    #[tokio::test]
    async fn remove_is_scoped_to_guild() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(ReactionAggregationEntity)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        ReactionAggregationFactory::new(db)
            .message_id("10")
            .guild_id("1")
            .build()
            .await?;

        let service = ReactionAggregationService::new(db);
        assert!(matches!(
            service.remove(2, 10).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(service.remove(1, 10).await?.message_id, 10);

        Ok(())
    }

    #[tokio::test]
    async fn stale_reminder_is_claimed_once() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(ReactionAggregationEntity)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let now = Utc::now();
        ReactionAggregationFactory::new(db)
            .message_id("10")
            .created_at(now - Duration::days(REMIND_AFTER_DAYS) - Duration::minutes(1))
            .build()
            .await?;

        let service = ReactionAggregationService::new(db);
        assert_eq!(service.claim_stale(now).await?.len(), 1);
        assert!(service.claim_stale(now).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn expiry_deletes_and_returns_old_aggregations() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(ReactionAggregationEntity)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let now = Utc::now();
        ReactionAggregationFactory::new(db)
            .message_id("10")
            .created_at(now - Duration::days(EXPIRE_AFTER_DAYS + 1))
            .build()
            .await?;
        ReactionAggregationFactory::new(db).message_id("11").build().await?;

        let service = ReactionAggregationService::new(db);
        let expired = service.expire(now).await?;

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].message_id, 10);
        assert_eq!(service.list(expired[0].guild_id).await?.len(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn list_skips_completed_aggregations() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(ReactionAggregationEntity)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let now = Utc::now();
        ReactionAggregationFactory::new(db)
            .message_id("10")
            .guild_id("1")
            .target_value(1)
            .sum(1)
            .notified_at(Some(now - Duration::minutes(5)))
            .build()
            .await?;
        ReactionAggregationFactory::new(db)
            .message_id("11")
            .guild_id("1")
            .build()
            .await?;

        let listed = ReactionAggregationService::new(db).list(1).await?;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].message_id, 11);

        Ok(())
    }

    #[tokio::test]
    async fn expiry_leaves_completed_aggregations_to_cleanup() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(ReactionAggregationEntity)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let now = Utc::now();
        ReactionAggregationFactory::new(db)
            .message_id("10")
            .created_at(now - Duration::days(EXPIRE_AFTER_DAYS + 1))
            .notified_at(Some(now - Duration::minutes(5)))
            .build()
            .await?;

        let service = ReactionAggregationService::new(db);
        assert!(service.expire(now).await?.is_empty());
        assert_eq!(service.purge_notified(now).await?, 0);
        assert_eq!(
            service.purge_notified(now + Duration::hours(CLEANUP_AFTER_HOURS)).await?,
            1
        );

        Ok(())
    }
}
