use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Polling::Table)
                    .if_not_exists()
                    .col(string(Polling::MessageId).primary_key())
                    .col(string(Polling::GuildId))
                    .col(string(Polling::ChannelId))
                    .col(string(Polling::AuthorId))
                    .col(string(Polling::Question))
                    .col(timestamp(Polling::CreatedAt))
                    .col(string(Polling::AllowedIds).default(""))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Polling::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Polling {
    Table,
    MessageId,
    GuildId,
    ChannelId,
    AuthorId,
    Question,
    CreatedAt,
    AllowedIds,
}
