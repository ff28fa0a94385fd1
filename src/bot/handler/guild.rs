use dioxus_logger::tracing;
use serenity::all::{Context, CreateEmbed, CreateMessage, Guild};

const WELCOME_COLOR: u32 = 0x3498db;

/// Greets a guild the bot has just joined.
///
/// `guild_create` also fires for every guild on startup; only `is_new == Some(true)` means
/// the bot was actually added. Guilds without a system channel get no greeting.
pub async fn handle_guild_create(ctx: Context, guild: Guild, is_new: Option<bool>) {
    tracing::debug!("Guild create event: {} ({})", guild.name, guild.id);

    if is_new != Some(true) {
        return;
    }

    tracing::info!("Joined guild {} ({})", guild.name, guild.id);

    let Some(channel_id) = guild.system_channel_id else {
        return;
    };

    let embed = CreateEmbed::new()
        .title("Thanks for inviting me!")
        .description(
            "Run `/s_init` with a bot manager role and a bot user role to get started.\n\
             Members need one of those roles to use the bot.",
        )
        .color(WELCOME_COLOR);

    if let Err(e) = channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await
    {
        tracing::error!("Failed to post welcome message in guild {}: {}", guild.id, e);
    }
}
