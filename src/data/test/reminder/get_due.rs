use super::*;

/// Tests selecting reminders whose next run has passed.
///
/// Expected: only the overdue reminder
#[tokio::test]
async fn returns_only_due_reminders() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let due = ReminderFactory::new(db)
        .next_run_at(now - Duration::minutes(1))
        .build()
        .await?;
    ReminderFactory::new(db)
        .next_run_at(now + Duration::minutes(5))
        .build()
        .await?;

    let repo = ReminderRepository::new(db);
    let result = repo.get_due(now).await?;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, due.id);

    Ok(())
}
