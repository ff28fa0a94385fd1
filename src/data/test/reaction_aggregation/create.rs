use super::*;

/// Tests storing a new aggregation.
///
/// Verifies counters start at zero and the allowed list survives the round trip
/// through its comma-joined storage form.
///
/// Expected: Ok with zeroed counters
#[tokio::test]
async fn creates_aggregation_with_zeroed_counters() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ReactionAggregationRepository::new(db);
    let aggregation = repo
        .create(CreateReactionAggregationParam {
            message_id: 10,
            guild_id: 1,
            channel_id: 2,
            command_message_id: 9,
            target_value: 3,
            author_id: 4,
            allowed_ids: vec![50, 60],
        })
        .await?;

    assert_eq!(aggregation.sum, 0);
    assert_eq!(aggregation.matte, 0);
    assert!(!aggregation.reminded);
    assert!(aggregation.notified_at.is_none());

    let stored = repo.find_by_message_id(10).await?.unwrap();
    assert_eq!(stored.allowed_ids, vec![50, 60]);
    assert_eq!(stored.target_value, 3);

    Ok(())
}

/// Tests that an empty allowed list is stored and read back as unrestricted.
///
/// Expected: Ok with empty allowed_ids
#[tokio::test]
async fn stores_unrestricted_aggregation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ReactionAggregationRepository::new(db);
    repo.create(CreateReactionAggregationParam {
        message_id: 11,
        guild_id: 1,
        channel_id: 2,
        command_message_id: 9,
        target_value: 1,
        author_id: 4,
        allowed_ids: vec![],
    })
    .await?;

    let stored = repo.find_by_message_id(11).await?.unwrap();
    assert!(stored.allowed_ids.is_empty());

    Ok(())
}
