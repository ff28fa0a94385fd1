//! SeaORM entity models for every table the bot persists.

pub mod prelude;

pub mod dm_notification_role;
pub mod guild_setting;
pub mod inactive_member;
pub mod polling;
pub mod reaction_aggregation;
pub mod reminder;
pub mod role_reaction;
pub mod tweet_queue;
