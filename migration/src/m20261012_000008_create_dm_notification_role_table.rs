use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DmNotificationRole::Table)
                    .if_not_exists()
                    .col(string(DmNotificationRole::GuildId))
                    .col(string(DmNotificationRole::RoleId))
                    .col(boolean(DmNotificationRole::EnableDm).default(false))
                    .primary_key(
                        Index::create()
                            .col(DmNotificationRole::GuildId)
                            .col(DmNotificationRole::RoleId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DmNotificationRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DmNotificationRole {
    Table,
    GuildId,
    RoleId,
    EnableDm,
}
