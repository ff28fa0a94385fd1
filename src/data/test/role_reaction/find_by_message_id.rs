use super::*;

/// Tests that a created role reaction can be found by its message.
///
/// Expected: Ok(Some) with the role id
#[tokio::test]
async fn finds_created_role_reaction() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RoleReaction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoleReactionRepository::new(db);
    repo.create(CreateRoleReactionParam {
        message_id: 10,
        guild_id: 1,
        channel_id: 2,
        role_id: 40,
        author_id: 3,
    })
    .await?;

    let found = repo.find_by_message_id(10).await?.unwrap();
    assert_eq!(found.role_id, 40);

    Ok(())
}

/// Tests lookups on messages that do not hand out roles.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_other_messages() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RoleReaction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_role_reaction(db, "10", "40").await?;

    let repo = RoleReactionRepository::new(db);
    assert!(repo.find_by_message_id(11).await?.is_none());

    Ok(())
}
