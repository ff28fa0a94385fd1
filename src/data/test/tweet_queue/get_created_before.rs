use super::*;

/// Tests selecting tweets past the queue expiry.
///
/// Expected: only the tweet older than the cutoff
#[tokio::test]
async fn selects_expired_tweets() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TweetQueue)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    TweetQueueFactory::new(db)
        .message_id("1")
        .created_at(now - Duration::days(31))
        .build()
        .await?;
    TweetQueueFactory::new(db)
        .message_id("2")
        .created_at(now - Duration::days(1))
        .build()
        .await?;

    let repo = TweetQueueRepository::new(db);
    let expired = repo.get_created_before(now - Duration::days(30)).await?;

    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].message_id, 1);

    Ok(())
}
