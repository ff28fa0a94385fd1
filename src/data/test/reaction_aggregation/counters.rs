use super::*;

/// Tests that increments update the counter matching the reaction kind.
///
/// Expected: sum and matte each incremented independently
#[tokio::test]
async fn increments_matching_counter() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ReactionAggregationFactory::new(db).message_id("10").build().await?;

    let repo = ReactionAggregationRepository::new(db);
    assert!(repo.increment(10, ReactionKind::Count).await?);
    assert!(repo.increment(10, ReactionKind::Count).await?);
    assert!(repo.increment(10, ReactionKind::Matte).await?);

    let stored = repo.find_by_message_id(10).await?.unwrap();
    assert_eq!(stored.sum, 2);
    assert_eq!(stored.matte, 1);

    Ok(())
}

/// Tests that decrements never push a counter below zero.
///
/// A removal can arrive for a reaction that was never counted, e.g. one added before
/// the bot came online.
///
/// Expected: Ok(false) and counter stays at zero
#[tokio::test]
async fn decrement_clamps_at_zero() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ReactionAggregationFactory::new(db)
        .message_id("10")
        .sum(1)
        .build()
        .await?;

    let repo = ReactionAggregationRepository::new(db);
    assert!(repo.decrement(10, ReactionKind::Count).await?);
    assert!(!repo.decrement(10, ReactionKind::Count).await?);
    assert!(!repo.decrement(10, ReactionKind::Matte).await?);

    let stored = repo.find_by_message_id(10).await?.unwrap();
    assert_eq!(stored.sum, 0);
    assert_eq!(stored.matte, 0);

    Ok(())
}

/// Tests counter updates on a message without an aggregation.
///
/// Expected: Ok(false)
#[tokio::test]
async fn unknown_message_is_not_updated() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ReactionAggregationRepository::new(db);
    assert!(!repo.increment(999, ReactionKind::Count).await?);

    Ok(())
}
