//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! together with the guild setting they depend on.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// This function provides monotonically increasing values for use in
/// generating unique snowflake-like identifiers across all factories.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a guild setting together with an open aggregation in that guild.
///
/// All entities are created with default values. Use the individual
/// factories if you need to customize specific entities.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((setting, aggregation))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_aggregation_with_setting(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::guild_setting::Model,
        entity::reaction_aggregation::Model,
    ),
    DbErr,
> {
    let setting = crate::factory::guild_setting::create_guild_setting(db).await?;
    let aggregation =
        crate::factory::reaction_aggregation::ReactionAggregationFactory::new(db)
            .guild_id(setting.guild_id.clone())
            .build()
            .await?;

    Ok((setting, aggregation))
}
