use super::*;

/// Tests registering a mix of new and already watched members.
///
/// Already watched members keep their history and are not counted.
///
/// Expected: Ok(2) and the existing member is unchanged
#[tokio::test]
async fn registers_only_new_members() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InactiveMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let old = Utc::now() - Duration::days(10);
    InactiveMemberFactory::new(db, "1")
        .last_posted(old)
        .notified(true)
        .build()
        .await?;

    let repo = InactiveMemberRepository::new(db);
    let registered = repo.register_many(&[1, 2, 3], Utc::now()).await?;

    assert_eq!(registered, 2);

    let existing = repo.find_by_user_id(1).await?.unwrap();
    assert!(existing.notified);
    assert_eq!(existing.last_posted.timestamp(), old.timestamp());

    let new = repo.find_by_user_id(2).await?.unwrap();
    assert!(!new.notified);

    Ok(())
}

/// Tests overlapping registrations of the same members.
///
/// Each member is inserted once no matter how many calls or repeats name it.
///
/// Expected: the counts of both calls add up to the distinct members
#[tokio::test]
async fn overlapping_registrations_insert_each_member_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InactiveMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InactiveMemberRepository::new(db);
    let now = Utc::now();
    let (first, second) = tokio::join!(
        repo.register_many(&[1, 2, 2, 3], now),
        repo.register_many(&[3, 2, 4], now),
    );

    assert_eq!(first? + second?, 4);
    assert_eq!(repo.register_many(&[1, 4], now).await?, 0);

    Ok(())
}

/// Tests deleting a watched member.
///
/// Expected: Ok(true) for a watched member, Ok(false) otherwise
#[tokio::test]
async fn deletes_watched_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InactiveMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_inactive_member(db, "1").await?;

    let repo = InactiveMemberRepository::new(db);
    assert!(repo.delete(1).await?);
    assert!(!repo.delete(1).await?);

    Ok(())
}
