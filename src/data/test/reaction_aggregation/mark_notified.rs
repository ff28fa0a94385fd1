use super::*;

/// Tests that only the first completion marks the aggregation.
///
/// Expected: first call Ok(true), second call Ok(false)
#[tokio::test]
async fn marks_notified_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ReactionAggregationFactory::new(db).message_id("10").build().await?;

    let repo = ReactionAggregationRepository::new(db);
    let now = Utc::now();

    assert!(repo.mark_notified(10, now).await?);
    assert!(!repo.mark_notified(10, now + Duration::seconds(1)).await?);

    let stored = repo.find_by_message_id(10).await?.unwrap();
    assert!(stored.notified_at.is_some());

    Ok(())
}
