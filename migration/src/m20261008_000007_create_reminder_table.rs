use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reminder::Table)
                    .if_not_exists()
                    .col(pk_auto(Reminder::Id))
                    .col(string(Reminder::GuildId))
                    .col(string(Reminder::ChannelId))
                    .col(string(Reminder::AuthorId))
                    .col(text(Reminder::Content))
                    .col(timestamp(Reminder::NextRunAt))
                    .col(integer_null(Reminder::IntervalMinutes))
                    .col(integer_null(Reminder::Remaining))
                    .col(timestamp(Reminder::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reminder_next_run_at")
                    .table(Reminder::Table)
                    .col(Reminder::NextRunAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reminder_next_run_at")
                    .table(Reminder::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Reminder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reminder {
    Table,
    Id,
    GuildId,
    ChannelId,
    AuthorId,
    Content,
    NextRunAt,
    IntervalMinutes,
    Remaining,
    CreatedAt,
}
