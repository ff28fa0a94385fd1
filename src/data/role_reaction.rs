use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::model::role_reaction::{CreateRoleReactionParam, RoleReaction};

/// Repository for messages that grant roles through reactions.
pub struct RoleReactionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleReactionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateRoleReactionParam) -> Result<RoleReaction, DbErr> {
        let entity = entity::role_reaction::ActiveModel {
            message_id: ActiveValue::Set(param.message_id.to_string()),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            role_id: ActiveValue::Set(param.role_id.to_string()),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        RoleReaction::from_entity(entity)
    }

    pub async fn find_by_message_id(&self, message_id: u64) -> Result<Option<RoleReaction>, DbErr> {
        let entity = entity::prelude::RoleReaction::find_by_id(message_id.to_string())
            .one(self.db)
            .await?;

        entity.map(RoleReaction::from_entity).transpose()
    }
}
