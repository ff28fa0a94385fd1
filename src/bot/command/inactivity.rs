use chrono::Utc;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponseMessage, EditInteractionResponse,
};

use super::{expand_mentions, require_bot_manager, require_bot_user, respond, respond_text};
use crate::{
    error::AppError,
    service::inactivity::InactivityService,
    state::BotState,
    util::{
        options::{get_str, get_user},
        parse::{parse_mentions, Mention},
        time::format_local,
    },
};

const ACTIVE_COLOR: u32 = 0x2ecc71;
const INACTIVE_COLOR: u32 = 0xe74c3c;
/// Members listed per embed before the rest is summarized.
const MAX_LISTED: usize = 40;

pub fn register() -> Vec<CreateCommand> {
    let with_targets = |name: &str, description: &str| {
        CreateCommand::new(name).description(description).add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "targets",
                "Roles or members, as mentions",
            )
            .required(true),
        )
    };

    vec![
        with_targets("register_watching", "Start watching members for inactivity"),
        CreateCommand::new("remove_watching")
            .description("Stop watching a member")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "member", "Watched member")
                    .required(true),
            ),
        with_targets("activate", "Mark members active as of now"),
        with_targets("inactivate", "Mark members inactive"),
        CreateCommand::new("check_active").description("List watched members considered active"),
        CreateCommand::new("check_inactive").description("List watched members reported inactive"),
    ]
}

pub async fn register_watching(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_bot_manager(state, command).await?;
    let targets = targets(command)?;

    // Expanding roles may page through the whole member list.
    command.defer(&ctx.http).await?;

    let user_ids = expand_mentions(ctx, guild_id, &targets).await?;
    let registered = InactivityService::new(&state.db)
        .register(&user_ids, Utc::now())
        .await?;

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!(
                "Registered {} members ({} already watched)",
                registered,
                (user_ids.len() as u64).saturating_sub(registered)
            )),
        )
        .await?;

    Ok(())
}

pub async fn remove_watching(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    require_bot_manager(state, command).await?;

    let options = command.data.options();
    let Some(user) = get_user(&options, "member") else {
        return Err(AppError::BadRequest("A member is required".to_string()));
    };

    InactivityService::new(&state.db)
        .unregister(user.id.get())
        .await?;

    respond_text(ctx, command, format!("Stopped watching <@{}>", user.id)).await
}

pub async fn activate(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_manager(state, command).await?;
    let targets = targets(command)?;

    command.defer(&ctx.http).await?;

    let user_ids = expand_mentions(ctx, guild_id, &targets).await?;
    let updated = InactivityService::new(&state.db)
        .activate(&user_ids, Utc::now())
        .await?;

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!("Marked {} members active", updated)),
        )
        .await?;

    Ok(())
}

pub async fn inactivate(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_manager(state, command).await?;
    let targets = targets(command)?;

    command.defer(&ctx.http).await?;

    let user_ids = expand_mentions(ctx, guild_id, &targets).await?;
    let updated = InactivityService::new(&state.db)
        .inactivate(&user_ids)
        .await?;

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!("Marked {} members inactive", updated)),
        )
        .await?;

    Ok(())
}

/// Lists watched members with `notified == inactive`.
pub async fn check(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
    inactive: bool,
) -> Result<(), AppError> {
    require_bot_user(state, command).await?;

    let members = InactivityService::new(&state.db).list(inactive).await?;
    let (title, color) = if inactive {
        ("Inactive members", INACTIVE_COLOR)
    } else {
        ("Active members", ACTIVE_COLOR)
    };

    if members.is_empty() {
        return respond_text(ctx, command, format!("{}: none", title)).await;
    }

    let timezone = &state.config.timezone;
    let lines = members
        .iter()
        .take(MAX_LISTED)
        .map(|m| {
            format!(
                "<@{}> last post {}, last reaction {}",
                m.user_id,
                format_local(m.last_posted, timezone),
                format_local(m.last_react, timezone)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut embed = CreateEmbed::new().title(title).description(lines).color(color);
    if members.len() > MAX_LISTED {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "and {} more",
            members.len() - MAX_LISTED
        )));
    }

    respond(ctx, command, CreateInteractionResponseMessage::new().embed(embed)).await
}

fn targets(command: &CommandInteraction) -> Result<Vec<Mention>, AppError> {
    let options = command.data.options();
    let mentions = get_str(&options, "targets")
        .map(parse_mentions)
        .unwrap_or_default();

    if mentions.is_empty() {
        return Err(AppError::BadRequest(
            "Mention at least one role or member".to_string(),
        ));
    }

    Ok(mentions)
}
