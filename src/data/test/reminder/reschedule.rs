use super::*;

/// Tests moving a reminder to its next slot.
///
/// Expected: next_run_at and remaining updated in place
#[tokio::test]
async fn updates_next_run_and_remaining() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = ReminderFactory::new(db)
        .interval_minutes(Some(30))
        .remaining(Some(3))
        .build()
        .await?;
    let next = stored.next_run_at + Duration::minutes(30);

    let repo = ReminderRepository::new(db);
    repo.reschedule(stored.id, next, Some(2)).await?;

    let updated = repo.find_by_id(stored.id).await?.unwrap();
    assert_eq!(updated.next_run_at.timestamp(), next.timestamp());
    assert_eq!(updated.remaining, Some(2));

    Ok(())
}

/// Tests deleting a finished reminder.
///
/// Expected: Ok(true) then the reminder is gone
#[tokio::test]
async fn deletes_reminder() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = ReminderFactory::new(db).build().await?;

    let repo = ReminderRepository::new(db);
    assert!(repo.delete(stored.id).await?);
    assert!(repo.find_by_id(stored.id).await?.is_none());

    Ok(())
}
