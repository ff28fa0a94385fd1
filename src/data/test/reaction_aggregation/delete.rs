use super::*;

/// Tests deleting a single aggregation.
///
/// Expected: Ok(true) then Ok(false) for the same message
#[tokio::test]
async fn deletes_aggregation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ReactionAggregationFactory::new(db).message_id("10").build().await?;

    let repo = ReactionAggregationRepository::new(db);
    assert!(repo.delete(10).await?);
    assert!(!repo.delete(10).await?);
    assert!(repo.find_by_message_id(10).await?.is_none());

    Ok(())
}

/// Tests clearing one guild without touching another.
///
/// Expected: Ok(2) and the other guild's aggregation survives
#[tokio::test]
async fn deletes_only_the_given_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ReactionAggregationFactory::new(db).guild_id("1").build().await?;
    ReactionAggregationFactory::new(db).guild_id("1").build().await?;
    ReactionAggregationFactory::new(db).guild_id("2").build().await?;

    let repo = ReactionAggregationRepository::new(db);
    assert_eq!(repo.delete_by_guild_id(1).await?, 2);
    assert!(repo.get_open_by_guild_id(1).await?.is_empty());
    assert_eq!(repo.get_open_by_guild_id(2).await?.len(), 1);

    Ok(())
}
