use super::*;

/// Tests expiring polls older than the cutoff.
///
/// Expected: Ok(1) and the recent poll survives
#[tokio::test]
async fn deletes_only_old_polls() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Polling)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    PollingFactory::new(db)
        .message_id("1")
        .created_at(now - Duration::days(31))
        .build()
        .await?;
    PollingFactory::new(db)
        .message_id("2")
        .created_at(now - Duration::days(2))
        .build()
        .await?;

    let repo = PollingRepository::new(db);
    assert_eq!(repo.delete_created_before(now - Duration::days(30)).await?, 1);
    assert!(repo.find_by_message_id(1).await?.is_none());
    assert!(repo.find_by_message_id(2).await?.is_some());

    Ok(())
}
