use super::*;

/// Tests selecting aggregations due for the stale reminder.
///
/// Only open, unreminded aggregations older than the cutoff qualify.
///
/// Expected: exactly the old open aggregation
#[tokio::test]
async fn selects_aggregations_needing_reminder() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let old = now - Duration::days(4);

    ReactionAggregationFactory::new(db)
        .message_id("1")
        .created_at(old)
        .build()
        .await?;
    ReactionAggregationFactory::new(db)
        .message_id("2")
        .created_at(old)
        .reminded(true)
        .build()
        .await?;
    ReactionAggregationFactory::new(db)
        .message_id("3")
        .created_at(old)
        .notified_at(Some(now))
        .build()
        .await?;
    ReactionAggregationFactory::new(db)
        .message_id("4")
        .build()
        .await?;

    let repo = ReactionAggregationRepository::new(db);
    let due = repo.get_needing_reminder(now - Duration::days(3)).await?;

    assert_eq!(due.len(), 1);
    assert_eq!(due[0].message_id, 1);

    Ok(())
}

/// Tests purging aggregations notified long enough ago.
///
/// Expected: only the aggregation notified before the cutoff is deleted
#[tokio::test]
async fn purges_old_notified_aggregations() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();

    ReactionAggregationFactory::new(db)
        .message_id("1")
        .notified_at(Some(now - Duration::hours(2)))
        .build()
        .await?;
    ReactionAggregationFactory::new(db)
        .message_id("2")
        .notified_at(Some(now - Duration::minutes(10)))
        .build()
        .await?;
    ReactionAggregationFactory::new(db)
        .message_id("3")
        .build()
        .await?;

    let repo = ReactionAggregationRepository::new(db);
    assert_eq!(repo.delete_notified_before(now - Duration::hours(1)).await?, 1);
    assert!(repo.find_by_message_id(1).await?.is_none());
    assert!(repo.find_by_message_id(2).await?.is_some());
    assert!(repo.find_by_message_id(3).await?.is_some());

    Ok(())
}

/// Tests selecting aggregations past the hard expiry.
///
/// Completed aggregations are excluded even when old.
///
/// Expected: only the open aggregation created before the cutoff
#[tokio::test]
async fn selects_expired_aggregations() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionAggregation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();

    ReactionAggregationFactory::new(db)
        .message_id("1")
        .created_at(now - Duration::days(15))
        .build()
        .await?;
    ReactionAggregationFactory::new(db)
        .message_id("2")
        .created_at(now - Duration::days(13))
        .build()
        .await?;
    ReactionAggregationFactory::new(db)
        .message_id("3")
        .created_at(now - Duration::days(15))
        .notified_at(Some(now - Duration::minutes(30)))
        .build()
        .await?;

    let repo = ReactionAggregationRepository::new(db);
    let expired = repo.get_open_created_before(now - Duration::days(14)).await?;

    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].message_id, 1);

    Ok(())
}
