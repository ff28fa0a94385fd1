use super::*;

/// Tests storing a restricted poll and reading it back.
///
/// Expected: Ok with question and audience preserved
#[tokio::test]
async fn creates_poll() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Polling)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PollingRepository::new(db);
    repo.create(CreatePollingParam {
        message_id: 10,
        guild_id: 1,
        channel_id: 2,
        author_id: 3,
        question: "Lunch?".to_string(),
        allowed_ids: vec![77],
    })
    .await?;

    let poll = repo.find_by_message_id(10).await?.unwrap();
    assert_eq!(poll.question, "Lunch?");
    assert_eq!(poll.allowed_ids, vec![77]);
    assert!(poll.permits(3, &[77]));
    assert!(!poll.permits(3, &[78]));

    Ok(())
}
