//! Domain models shared by repositories, services and bot handlers.
//!
//! Models convert from SeaORM entities at the repository boundary, parsing the stored
//! string snowflakes into `u64`. Parameter structs carry the input of create operations.

pub mod dm_notification_role;
pub mod guild_setting;
pub mod inactive_member;
pub mod polling;
pub mod reaction_aggregation;
pub mod reminder;
pub mod role_reaction;
pub mod tweet;
