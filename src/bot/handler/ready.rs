//! Ready event handler for bot initialization.
//!
//! Fired once the bot has connected to the gateway. Besides logging, this is where the
//! slash commands are (re)registered globally.

use dioxus_logger::tracing;
use serenity::all::{ActivityData, Command, Context, Ready};

use crate::bot::command;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `ctx` - Discord context for setting activity and registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord in {} guilds",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::custom("/s_init to get started")));

    match Command::set_global_commands(&ctx.http, command::register_all()).await {
        Ok(commands) => tracing::info!("Registered {} slash commands", commands.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
