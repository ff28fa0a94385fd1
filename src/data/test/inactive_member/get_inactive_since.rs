use super::*;

/// Tests the inactivity sweep query.
///
/// A member is inactive only when both timestamps are older than the cutoff and they
/// have not been reported yet.
///
/// Expected: only the fully idle, unreported member
#[tokio::test]
async fn selects_idle_unreported_members() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InactiveMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let idle = now - Duration::days(120);

    InactiveMemberFactory::new(db, "1")
        .last_posted(idle)
        .last_react(idle)
        .build()
        .await?;
    InactiveMemberFactory::new(db, "2")
        .last_posted(idle)
        .last_react(now)
        .build()
        .await?;
    InactiveMemberFactory::new(db, "3")
        .last_posted(idle)
        .last_react(idle)
        .notified(true)
        .build()
        .await?;

    let repo = InactiveMemberRepository::new(db);
    let inactive = repo.get_inactive_since(now - Duration::days(90)).await?;

    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].user_id, 1);

    Ok(())
}
