pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_guild_setting_table;
mod m20261001_000002_create_reaction_aggregation_table;
mod m20261002_000003_create_polling_table;
mod m20261002_000004_create_tweet_queue_table;
mod m20261003_000005_create_inactive_member_table;
mod m20261005_000006_create_role_reaction_table;
mod m20261008_000007_create_reminder_table;
mod m20261012_000008_create_dm_notification_role_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_guild_setting_table::Migration),
            Box::new(m20261001_000002_create_reaction_aggregation_table::Migration),
            Box::new(m20261002_000003_create_polling_table::Migration),
            Box::new(m20261002_000004_create_tweet_queue_table::Migration),
            Box::new(m20261003_000005_create_inactive_member_table::Migration),
            Box::new(m20261005_000006_create_role_reaction_table::Migration),
            Box::new(m20261008_000007_create_reminder_table::Migration),
            Box::new(m20261012_000008_create_dm_notification_role_table::Migration),
        ]
    }
}
