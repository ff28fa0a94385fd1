use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReactionAggregation::Table)
                    .if_not_exists()
                    .col(string(ReactionAggregation::MessageId).primary_key())
                    .col(string(ReactionAggregation::GuildId))
                    .col(string(ReactionAggregation::ChannelId))
                    .col(string(ReactionAggregation::CommandMessageId))
                    .col(integer(ReactionAggregation::TargetValue))
                    .col(integer(ReactionAggregation::Sum).default(0))
                    .col(integer(ReactionAggregation::Matte).default(0))
                    .col(string(ReactionAggregation::AuthorId))
                    .col(timestamp(ReactionAggregation::CreatedAt))
                    .col(timestamp_null(ReactionAggregation::NotifiedAt))
                    .col(boolean(ReactionAggregation::Reminded).default(false))
                    .col(string(ReactionAggregation::AllowedIds).default(""))
                    .to_owned(),
            )
            .await?;

        // Listing and clearing are always scoped to a guild
        manager
            .create_index(
                Index::create()
                    .name("idx_reaction_aggregation_guild_id")
                    .table(ReactionAggregation::Table)
                    .col(ReactionAggregation::GuildId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reaction_aggregation_guild_id")
                    .table(ReactionAggregation::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ReactionAggregation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ReactionAggregation {
    Table,
    MessageId,
    GuildId,
    ChannelId,
    CommandMessageId,
    TargetValue,
    Sum,
    Matte,
    AuthorId,
    CreatedAt,
    NotifiedAt,
    Reminded,
    AllowedIds,
}
