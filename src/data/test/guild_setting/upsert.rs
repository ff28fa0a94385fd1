use super::*;

/// Tests creating a setting for a guild that has none.
///
/// Expected: Ok with created flag set
#[tokio::test]
async fn creates_new_setting() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSetting)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingRepository::new(db);
    let (setting, created) = repo
        .upsert(UpsertGuildSettingParam {
            guild_id: 100,
            bot_manager_role_id: 1,
            bot_user_role_id: 2,
        })
        .await?;

    assert!(created);
    assert_eq!(setting.guild_id, 100);
    assert_eq!(setting.bot_manager_role_id, 1);
    assert_eq!(setting.bot_user_role_id, 2);

    Ok(())
}

/// Tests replacing the roles of an initialized guild.
///
/// Expected: Ok with created flag cleared and a single row
#[tokio::test]
async fn updates_existing_setting() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSetting)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_setting::GuildSettingFactory::new(db)
        .guild_id("100")
        .build()
        .await?;

    let repo = GuildSettingRepository::new(db);
    let (setting, created) = repo
        .upsert(UpsertGuildSettingParam {
            guild_id: 100,
            bot_manager_role_id: 7,
            bot_user_role_id: 8,
        })
        .await?;

    assert!(!created);
    assert_eq!(setting.bot_manager_role_id, 7);
    assert_eq!(setting.bot_user_role_id, 8);

    let count = entity::prelude::GuildSetting::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
