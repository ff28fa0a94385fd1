use super::*;

/// Tests listing every initialized guild.
///
/// Expected: Ok with one entry per stored setting
#[tokio::test]
async fn returns_every_setting() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSetting)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guild_setting(db).await?;
    factory::create_guild_setting(db).await?;

    let repo = GuildSettingRepository::new(db);
    assert_eq!(repo.get_all().await?.len(), 2);

    Ok(())
}
