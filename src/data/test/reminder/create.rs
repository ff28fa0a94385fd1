use super::*;

/// Tests storing a repeating reminder.
///
/// Expected: Ok with generated id and schedule preserved
#[tokio::test]
async fn creates_reminder() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first_run_at = Utc::now() + Duration::hours(2);

    let repo = ReminderRepository::new(db);
    let reminder = repo
        .create(CreateReminderParam {
            guild_id: 1,
            channel_id: 2,
            author_id: 3,
            content: "water the plants".to_string(),
            first_run_at,
            interval_minutes: Some(60),
            repeat: Some(3),
        })
        .await?;

    let stored = repo.find_by_id(reminder.id).await?.unwrap();
    assert_eq!(stored.content, "water the plants");
    assert_eq!(stored.interval_minutes, Some(60));
    assert_eq!(stored.remaining, Some(3));
    assert_eq!(stored.next_run_at.timestamp(), first_run_at.timestamp());

    Ok(())
}
