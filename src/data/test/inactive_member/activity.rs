use super::*;

/// Tests that a post by a watched member updates last_posted and clears notified.
///
/// Expected: Ok(true) with updated timestamp and flag cleared
#[tokio::test]
async fn touch_posted_updates_watched_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InactiveMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let old = Utc::now() - Duration::days(100);
    InactiveMemberFactory::new(db, "1")
        .last_posted(old)
        .last_react(old)
        .notified(true)
        .build()
        .await?;

    let now = Utc::now();
    let repo = InactiveMemberRepository::new(db);
    assert!(repo.touch_posted(1, now).await?);

    let member = repo.find_by_user_id(1).await?.unwrap();
    assert_eq!(member.last_posted.timestamp(), now.timestamp());
    assert_eq!(member.last_react.timestamp(), old.timestamp());
    assert!(!member.notified);

    Ok(())
}

/// Tests that activity of unwatched users is ignored.
///
/// Expected: Ok(false) and no row created
#[tokio::test]
async fn touch_ignores_unwatched_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InactiveMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InactiveMemberRepository::new(db);
    assert!(!repo.touch_react(5, Utc::now()).await?);
    assert!(repo.find_by_user_id(5).await?.is_none());

    Ok(())
}

/// Tests manual activation and inactivation.
///
/// Expected: flags follow the calls and only watched members are counted
#[tokio::test]
async fn activates_and_inactivates_members() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InactiveMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_inactive_member(db, "1").await?;
    factory::create_inactive_member(db, "2").await?;

    let repo = InactiveMemberRepository::new(db);
    assert_eq!(repo.set_notified(&[1, 2, 3], true).await?, 2);
    assert_eq!(repo.get_by_notified(true).await?.len(), 2);

    assert_eq!(repo.activate(&[1], Utc::now()).await?, 1);
    let active = repo.get_by_notified(false).await?;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].user_id, 1);

    Ok(())
}
