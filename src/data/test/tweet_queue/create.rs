use super::*;

/// Tests queueing a tweet and removing it again.
///
/// Expected: the tweet is found until deleted
#[tokio::test]
async fn queues_and_removes_tweet() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TweetQueue)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TweetQueueRepository::new(db);
    repo.create(CreateTweetParam {
        message_id: 10,
        guild_id: 1,
        channel_id: 2,
        author_id: 3,
        content: "Meetup on Friday!".to_string(),
    })
    .await?;

    let queued = repo.find_by_message_id(10).await?.unwrap();
    assert_eq!(queued.content, "Meetup on Friday!");

    assert!(repo.delete(10).await?);
    assert!(repo.find_by_message_id(10).await?.is_none());

    Ok(())
}
