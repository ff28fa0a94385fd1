//! DM notification role factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a DM notification toggle for a guild role.
///
/// # Arguments
/// - `db` - Database connection
/// - `guild_id` - Guild owning the role
/// - `role_id` - Role the toggle applies to
/// - `enable_dm` - Whether members of the role receive DMs
pub async fn create_dm_notification_role(
    db: &DatabaseConnection,
    guild_id: &str,
    role_id: &str,
    enable_dm: bool,
) -> Result<entity::dm_notification_role::Model, DbErr> {
    entity::dm_notification_role::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        role_id: ActiveValue::Set(role_id.to_string()),
        enable_dm: ActiveValue::Set(enable_dm),
    }
    .insert(db)
    .await
}
