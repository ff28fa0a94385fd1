use chrono::{DateTime, Duration, Utc};
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    data::polling::PollingRepository,
    error::AppError,
    model::polling::{CreatePollingParam, Polling, FINISH_EMOJI},
};

/// Polls are forgotten once they are this old.
pub const POLL_EXPIRE_AFTER_DAYS: i64 = 30;

/// What the bot has to do after a reaction on a poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollReactionOutcome {
    Untracked,
    /// Reactor is outside the poll's audience; remove the reaction with a warning.
    Rejected(Polling),
    /// The author closed the poll; tally and post the results.
    Finish(Polling),
    /// Someone other than the author used the finish emoji; remove it.
    FinishDenied(Polling),
    /// An ordinary vote, left as is.
    Vote,
}

pub struct PollingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PollingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreatePollingParam) -> Result<Polling, AppError> {
        let polling = PollingRepository::new(self.db).create(param).await?;

        tracing::info!(
            "Started poll {} in guild {}",
            polling.message_id,
            polling.guild_id
        );

        Ok(polling)
    }

    /// Classifies a reaction added to a message.
    ///
    /// The finish emoji is checked before the audience so that an outsider pressing it is
    /// told the poll belongs to its author rather than that they may not vote.
    pub async fn handle_add(
        &self,
        message_id: u64,
        user_id: u64,
        role_ids: &[u64],
        emoji_name: &str,
    ) -> Result<PollReactionOutcome, AppError> {
        let Some(polling) = PollingRepository::new(self.db)
            .find_by_message_id(message_id)
            .await?
        else {
            return Ok(PollReactionOutcome::Untracked);
        };

        if emoji_name == FINISH_EMOJI {
            return Ok(if polling.author_id == user_id {
                PollReactionOutcome::Finish(polling)
            } else {
                PollReactionOutcome::FinishDenied(polling)
            });
        }

        if !polling.permits(user_id, role_ids) {
            return Ok(PollReactionOutcome::Rejected(polling));
        }

        Ok(PollReactionOutcome::Vote)
    }

    /// Forgets a finished poll. Returns false when another event already closed it.
    pub async fn close(&self, message_id: u64) -> Result<bool, AppError> {
        Ok(PollingRepository::new(self.db).delete(message_id).await?)
    }

    /// Deletes polls older than the expiry and returns how many were removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let deleted = PollingRepository::new(self.db)
            .delete_created_before(now - Duration::days(POLL_EXPIRE_AFTER_DAYS))
            .await?;

        if deleted > 0 {
            tracing::info!("Deleted {} expired polls", deleted);
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory::polling::PollingFactory};

    #[tokio::test]
    async fn finish_is_reserved_for_the_author() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Polling)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        PollingFactory::new(db)
            .message_id("10")
            .author_id("1")
            .build()
            .await?;

        let service = PollingService::new(db);

        assert!(matches!(
            service.handle_add(10, 2, &[], FINISH_EMOJI).await?,
            PollReactionOutcome::FinishDenied(_)
        ));
        assert!(matches!(
            service.handle_add(10, 1, &[], FINISH_EMOJI).await?,
            PollReactionOutcome::Finish(_)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn rejects_votes_outside_the_audience() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Polling)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        PollingFactory::new(db)
            .message_id("10")
            .allowed_ids("50")
            .build()
            .await?;

        let service = PollingService::new(db);

        assert!(matches!(
            service.handle_add(10, 2, &[60], "⭕").await?,
            PollReactionOutcome::Rejected(_)
        ));
        assert_eq!(
            service.handle_add(10, 2, &[50], "⭕").await?,
            PollReactionOutcome::Vote
        );
        assert_eq!(
            service.handle_add(11, 2, &[50], "⭕").await?,
            PollReactionOutcome::Untracked
        );

        Ok(())
    }

    #[tokio::test]
    async fn close_only_succeeds_once() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Polling)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        PollingFactory::new(db).message_id("10").build().await?;

        let service = PollingService::new(db);
        assert!(service.close(10).await?);
        assert!(!service.close(10).await?);

        Ok(())
    }
}
