use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoleReaction::Table)
                    .if_not_exists()
                    .col(string(RoleReaction::MessageId).primary_key())
                    .col(string(RoleReaction::GuildId))
                    .col(string(RoleReaction::ChannelId))
                    .col(string(RoleReaction::RoleId))
                    .col(string(RoleReaction::AuthorId))
                    .col(timestamp(RoleReaction::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoleReaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RoleReaction {
    Table,
    MessageId,
    GuildId,
    ChannelId,
    RoleId,
    AuthorId,
    CreatedAt,
}
