use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    data::reminder::ReminderRepository,
    error::AppError,
    model::reminder::{CreateReminderParam, NextRun, Reminder},
};

pub struct ReminderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReminderService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Schedules a reminder.
    ///
    /// # Returns
    /// - `Ok(Reminder)` - The stored reminder
    /// - `Err(AppError::BadRequest)` - First run is not in the future
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(
        &self,
        param: CreateReminderParam,
        now: DateTime<Utc>,
    ) -> Result<Reminder, AppError> {
        if param.first_run_at <= now {
            return Err(AppError::BadRequest(
                "The reminder time must be in the future".to_string(),
            ));
        }

        let reminder = ReminderRepository::new(self.db).create(param).await?;

        tracing::info!(
            "Scheduled reminder {} in guild {} for {}",
            reminder.id,
            reminder.guild_id,
            reminder.next_run_at
        );

        Ok(reminder)
    }

    pub async fn list(&self, guild_id: u64) -> Result<Vec<Reminder>, AppError> {
        Ok(ReminderRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?)
    }

    /// Deletes a reminder on behalf of its author or a bot manager.
    ///
    /// # Returns
    /// - `Ok(Reminder)` - The deleted reminder
    /// - `Err(AppError::NotFound)` - No such reminder in this guild
    /// - `Err(AppError::Forbidden)` - Requester is neither the author nor a manager
    pub async fn remove(
        &self,
        guild_id: u64,
        id: i32,
        requester_id: u64,
        is_manager: bool,
    ) -> Result<Reminder, AppError> {
        let repo = ReminderRepository::new(self.db);

        let reminder = repo
            .find_by_id(id)
            .await?
            .filter(|r| r.guild_id == guild_id)
            .ok_or_else(|| AppError::NotFound(format!("No reminder with id {}", id)))?;

        if reminder.author_id != requester_id && !is_manager {
            return Err(AppError::Forbidden(
                "Only the author or a bot manager can remove this reminder".to_string(),
            ));
        }

        repo.delete(id).await?;

        Ok(reminder)
    }

    pub async fn get_due(&self, now: DateTime<Utc>) -> Result<Vec<Reminder>, AppError> {
        Ok(ReminderRepository::new(self.db).get_due(now).await?)
    }

    /// Moves a reminder that just fired to its next slot or deletes it when exhausted.
    pub async fn complete_run(&self, reminder: &Reminder, now: DateTime<Utc>) -> Result<NextRun, AppError> {
        let repo = ReminderRepository::new(self.db);
        let next = reminder.next_run(now);

        match next {
            NextRun::Reschedule { at, remaining } => {
                repo.reschedule(reminder.id, at, remaining).await?;
            }
            NextRun::Finished => {
                repo.delete(reminder.id).await?;
                tracing::debug!("Reminder {} finished", reminder.id);
            }
        }

        Ok(next)
    }
}
