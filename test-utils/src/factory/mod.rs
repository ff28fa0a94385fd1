//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Every identifier is a unique numeric string so that
//! repositories can parse it back into a Discord snowflake.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let setting = factory::create_guild_setting(&db).await?;
//!
//!     // Create with customization
//!     let aggregation = factory::reaction_aggregation::ReactionAggregationFactory::new(&db)
//!         .guild_id(setting.guild_id.clone())
//!         .target_value(3)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `guild_setting` - Guild setting rows
//! - `reaction_aggregation` - Reaction aggregation rows
//! - `polling` - Poll rows
//! - `reminder` - Scheduled reminder rows
//! - `role_reaction` - Role-by-reaction rows
//! - `inactive_member` - Watched member rows
//! - `tweet_queue` - Queued tweet rows
//! - `dm_notification_role` - DM notification toggles
//! - `helpers` - ID generation and combined creation

pub mod dm_notification_role;
pub mod guild_setting;
pub mod helpers;
pub mod inactive_member;
pub mod polling;
pub mod reaction_aggregation;
pub mod reminder;
pub mod role_reaction;
pub mod tweet_queue;

// Re-export commonly used factory functions for concise usage
pub use dm_notification_role::create_dm_notification_role;
pub use guild_setting::create_guild_setting;
pub use inactive_member::create_inactive_member;
pub use polling::create_polling;
pub use reaction_aggregation::create_reaction_aggregation;
pub use reminder::create_reminder;
pub use role_reaction::create_role_reaction;
pub use tweet_queue::create_tweet;
