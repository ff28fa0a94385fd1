use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InactiveMember::Table)
                    .if_not_exists()
                    .col(string(InactiveMember::UserId).primary_key())
                    .col(timestamp(InactiveMember::LastPosted))
                    .col(timestamp(InactiveMember::LastReact))
                    .col(boolean(InactiveMember::Notified).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InactiveMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InactiveMember {
    Table,
    UserId,
    LastPosted,
    LastReact,
    Notified,
}
