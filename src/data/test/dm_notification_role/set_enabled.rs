use super::*;

/// Tests that unknown roles are registered disabled.
///
/// Expected: Ok with enable_dm false
#[tokio::test]
async fn registers_unknown_role_disabled() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DmNotificationRole)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DmNotificationRoleRepository::new(db);
    let role = repo.get_or_register(1, 10).await?;

    assert!(!role.enable_dm);
    assert!(repo.find(1, 10).await?.is_some());

    Ok(())
}

/// Tests toggling an existing role on and off.
///
/// Expected: the stored flag follows each call
#[tokio::test]
async fn updates_existing_toggle() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DmNotificationRole)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_dm_notification_role(db, "1", "10", false).await?;

    let repo = DmNotificationRoleRepository::new(db);
    assert!(repo.set_enabled(1, 10, true).await?.enable_dm);
    assert!(repo.find(1, 10).await?.unwrap().enable_dm);

    assert!(!repo.set_enabled(1, 10, false).await?.enable_dm);

    Ok(())
}
