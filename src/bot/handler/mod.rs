use serenity::all::{Context, EventHandler, Guild, Interaction, Message, Reaction, Ready};
use serenity::async_trait;

use crate::state::BotState;

pub mod guild;
pub mod interaction;
pub mod message;
pub mod reaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub state: BotState,
}

impl Handler {
    pub fn new(state: BotState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(ctx, guild, is_new).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.state, ctx, message).await;
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_add(&self.state, ctx, reaction).await;
    }

    async fn reaction_remove(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_remove(&self.state, ctx, reaction).await;
    }

    /// Called for slash commands and button clicks
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.state, ctx, interaction).await;
    }
}
