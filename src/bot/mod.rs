//! Discord bot: gateway events and slash commands.
//!
//! The bot is initialized at startup and runs in its own tokio task. Its HTTP client is
//! shared with the scheduler so that periodic jobs can post messages without a second
//! connection.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability and the welcome message on join
//! - `GUILD_MESSAGES` - Posts of watched members
//! - `GUILD_MESSAGE_REACTIONS` - Aggregations, polls, role and tweet messages
//! - `GUILD_MEMBERS` - Expanding roles to members (privileged intent)
//!
//! `GUILD_MEMBERS` must be enabled in the Discord Developer Portal.

pub mod command;
pub mod handler;
pub mod start;
