use sea_orm::DatabaseConnection;

use crate::{
    data::role_reaction::RoleReactionRepository,
    error::AppError,
    model::role_reaction::{CreateRoleReactionParam, RoleAction, RoleReaction},
};

pub struct RoleReactionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleReactionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateRoleReactionParam) -> Result<RoleReaction, AppError> {
        Ok(RoleReactionRepository::new(self.db).create(param).await?)
    }

    /// Role change requested by a reaction, or `None` when the message is not a role
    /// message or the emoji means nothing on it.
    pub async fn action_for(
        &self,
        message_id: u64,
        emoji_name: &str,
        added: bool,
    ) -> Result<Option<RoleAction>, AppError> {
        let role_reaction = RoleReactionRepository::new(self.db)
            .find_by_message_id(message_id)
            .await?;

        Ok(role_reaction.and_then(|r| r.action_for(emoji_name, added)))
    }
}
