use super::*;

/// Tests that the stale reminder is claimed only once.
///
/// Expected: first call Ok(true), second call Ok(false)
#[tokio::test]
async fn marks_reminded_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ReactionAggregationFactory::new(db).message_id("10").build().await?;

    let repo = ReactionAggregationRepository::new(db);
    assert!(repo.mark_reminded(10).await?);
    assert!(!repo.mark_reminded(10).await?);

    Ok(())
}
