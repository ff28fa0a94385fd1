use super::*;

/// Tests paging through a guild's queue.
///
/// Expected: pages of the requested size and the guild-wide total
#[tokio::test]
async fn pages_guild_queue() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TweetQueue)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    for i in 0..12 {
        TweetQueueFactory::new(db)
            .guild_id("1")
            .created_at(now - Duration::minutes(60 - i))
            .build()
            .await?;
    }
    TweetQueueFactory::new(db).guild_id("2").build().await?;

    let repo = TweetQueueRepository::new(db);
    let (first, total) = repo.get_by_guild_paginated(1, 0, 10).await?;
    let (second, _) = repo.get_by_guild_paginated(1, 1, 10).await?;

    assert_eq!(total, 12);
    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 2);
    assert!(first[0].created_at <= first[1].created_at);

    Ok(())
}
