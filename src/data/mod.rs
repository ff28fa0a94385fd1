//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! table the bot persists. Repositories use SeaORM entity models internally and return
//! domain models to keep the data layer separate from business logic. All database
//! queries, inserts, updates, and deletes are performed through these repositories.

pub mod dm_notification_role;
pub mod guild_setting;
pub mod inactive_member;
pub mod polling;
pub mod reaction_aggregation;
pub mod reminder;
pub mod role_reaction;
pub mod tweet_queue;

#[cfg(test)]
mod test;
