//! Role reaction factory for creating role-by-reaction rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a role-by-reaction row binding `message_id` to `role_id`.
///
/// # Arguments
/// - `db` - Database connection
/// - `message_id` - Message carrying the join/leave reactions
/// - `role_id` - Role granted by the message
///
/// # Returns
/// - `Ok(entity::role_reaction::Model)` - Created row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_role_reaction(
    db: &DatabaseConnection,
    message_id: &str,
    role_id: &str,
) -> Result<entity::role_reaction::Model, DbErr> {
    entity::role_reaction::ActiveModel {
        message_id: ActiveValue::Set(message_id.to_string()),
        guild_id: ActiveValue::Set(next_id().to_string()),
        channel_id: ActiveValue::Set(next_id().to_string()),
        role_id: ActiveValue::Set(role_id.to_string()),
        author_id: ActiveValue::Set(next_id().to_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
