//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot handlers and the data (repository) layer. They enforce
//! the rules of each feature and return outcome values describing what the bot has to
//! do on Discord, keeping the state machines testable without a gateway connection.

pub mod backup;
pub mod dm_notification;
pub mod guild_setting;
pub mod inactivity;
pub mod permission;
pub mod polling;
pub mod reaction_aggregation;
pub mod reminder;
pub mod role_reaction;
pub mod tweet;
pub mod twitter;
