use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents};
use serenity::http::Http;
use std::sync::Arc;

use crate::bot::handler::Handler;
use crate::error::AppError;
use crate::state::BotState;

/// Builds the Discord client without connecting it.
///
/// The HTTP client is returned separately so the scheduler can use it while the gateway
/// connection runs in another task.
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to start and its shared HTTP client
/// - `Err(AppError)` - The client could not be built
pub async fn init_bot(state: BotState) -> Result<(Client, Arc<Http>), AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::GUILD_MEMBERS;

    let token = state.config.discord_bot_token.clone();
    let client = Client::builder(&token, intents)
        .event_handler(Handler::new(state))
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Connects to the gateway and runs until shutdown.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot");

    client.start().await?;

    Ok(())
}
