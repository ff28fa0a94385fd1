use std::time::Instant;

use serenity::all::{
    ActivityData, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateEmbed, CreateInteractionResponseMessage, EditInteractionResponse,
};

use super::{require_owner, respond, respond_ephemeral};
use crate::{
    error::AppError, service::backup::send_backup, state::BotState, util::options::get_str,
};

const ADMIN_COLOR: u32 = 0x95a5a6;

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("ping").description("Measure the bot's response time"),
        CreateCommand::new("num_of_member").description("Count the members of this server"),
        CreateCommand::new("status")
            .description("Set the bot's status text")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "word", "Status text")
                    .required(true)
                    .max_length(128),
            ),
        CreateCommand::new("where").description("List the servers the bot is in"),
        CreateCommand::new("back_up").description("Upload the database file to this channel"),
    ]
}

pub async fn ping(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let started = Instant::now();
    respond(
        ctx,
        command,
        CreateInteractionResponseMessage::new().content("Pong!"),
    )
    .await?;
    let elapsed = started.elapsed().as_millis();

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!("Pong! {}ms", elapsed)),
        )
        .await?;

    Ok(())
}

pub async fn num_of_member(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let Some(guild) = command.guild_id else {
        return Err(AppError::BadRequest(
            "This command can only be used in a server".to_string(),
        ));
    };

    let partial = guild.to_partial_guild_with_counts(&ctx.http).await?;
    let count = partial
        .approximate_member_count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    respond(
        ctx,
        command,
        CreateInteractionResponseMessage::new().content(format!(
            "{} has {} members",
            partial.name, count
        )),
    )
    .await
}

pub async fn status(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    require_owner(ctx, command).await?;

    let options = command.data.options();
    let Some(word) = get_str(&options, "word") else {
        return Err(AppError::BadRequest("Status text is required".to_string()));
    };

    ctx.set_activity(Some(ActivityData::custom(word)));

    respond_ephemeral(ctx, command, format!("Status set to \"{}\"", word)).await
}

pub async fn where_(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    require_owner(ctx, command).await?;

    let mut guilds: Vec<String> = ctx
        .cache
        .guilds()
        .into_iter()
        .map(|id| {
            let name = ctx
                .cache
                .guild(id)
                .map(|g| g.name.clone())
                .unwrap_or_else(|| "(not cached)".to_string());
            format!("{} `{}`", name, id)
        })
        .collect();
    guilds.sort();

    let embed = CreateEmbed::new()
        .title(format!("Servers ({})", guilds.len()))
        .description(guilds.join("\n"))
        .color(ADMIN_COLOR);

    respond(
        ctx,
        command,
        CreateInteractionResponseMessage::new()
            .embed(embed)
            .ephemeral(true),
    )
    .await
}

pub async fn back_up(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    require_owner(ctx, command).await?;

    let Some(path) = state.config.sqlite_path() else {
        return Err(AppError::BadRequest(
            "The database is not a SQLite file".to_string(),
        ));
    };

    command.defer_ephemeral(&ctx.http).await?;

    let reply = match send_backup(&ctx.http, command.channel_id.get(), &path).await {
        Ok(()) => "Backup uploaded".to_string(),
        Err(e) => e.user_message(),
    };

    command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(reply))
        .await?;

    Ok(())
}
