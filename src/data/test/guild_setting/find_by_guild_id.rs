use super::*;

/// Tests finding the setting of an initialized guild.
///
/// Expected: Ok(Some) with parsed role ids
#[tokio::test]
async fn finds_existing_setting() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSetting)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::create_guild_setting(db).await?;

    let repo = GuildSettingRepository::new(db);
    let setting = repo
        .find_by_guild_id(stored.guild_id.parse().unwrap())
        .await?
        .unwrap();

    assert_eq!(setting.bot_manager_role_id.to_string(), stored.bot_manager_role_id);
    assert_eq!(setting.bot_user_role_id.to_string(), stored.bot_user_role_id);

    Ok(())
}

/// Tests looking up a guild that never ran the init command.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSetting)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingRepository::new(db);
    assert!(repo.find_by_guild_id(424242).await?.is_none());

    Ok(())
}
