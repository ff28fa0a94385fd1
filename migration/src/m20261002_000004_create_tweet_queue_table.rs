use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TweetQueue::Table)
                    .if_not_exists()
                    .col(string(TweetQueue::MessageId).primary_key())
                    .col(string(TweetQueue::GuildId))
                    .col(string(TweetQueue::ChannelId))
                    .col(string(TweetQueue::AuthorId))
                    .col(text(TweetQueue::Content))
                    .col(timestamp(TweetQueue::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TweetQueue::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TweetQueue {
    Table,
    MessageId,
    GuildId,
    ChannelId,
    AuthorId,
    Content,
    CreatedAt,
}
