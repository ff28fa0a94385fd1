use super::*;

/// Tests listing the roles that opted into DMs.
///
/// Expected: only enabled roles of the requested guild
#[tokio::test]
async fn lists_enabled_roles_of_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DmNotificationRole)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_dm_notification_role(db, "1", "10", true).await?;
    factory::create_dm_notification_role(db, "1", "11", false).await?;
    factory::create_dm_notification_role(db, "2", "12", true).await?;

    let repo = DmNotificationRoleRepository::new(db);
    assert_eq!(repo.get_enabled_role_ids(1).await?, vec![10]);

    Ok(())
}
