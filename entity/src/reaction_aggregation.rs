use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "reaction_aggregation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub message_id: String,
    pub guild_id: String,
    pub channel_id: String,
    pub command_message_id: String,
    pub target_value: i32,
    pub sum: i32,
    pub matte: i32,
    pub author_id: String,
    pub created_at: DateTimeUtc,
    pub notified_at: Option<DateTimeUtc>,
    pub reminded: bool,
    /// Comma-joined role/user ids allowed to contribute. Empty means anyone.
    pub allowed_ids: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
