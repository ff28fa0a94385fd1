use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponseMessage,
};

use super::{
    describe_allowed, dm_notification::notify_opted_in_members, require_bot_manager,
    require_bot_user, respond, respond_text,
};
use crate::{
    error::AppError,
    model::reaction_aggregation::CreateReactionAggregationParam,
    service::reaction_aggregation::ReactionAggregationService,
    state::BotState,
    util::{
        message::message_url,
        options::{get_integer, get_str},
        parse::{parse_mentions, Mention},
        time::format_local,
    },
};

const LIST_COLOR: u32 = 0xf1c40f;
/// Discord allows at most 25 fields per embed.
const MAX_LISTED: usize = 25;

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("count")
            .description("Count reactions on a message until a target is reached")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "target",
                    "Number of reactions to wait for",
                )
                .required(true)
                .min_int_value(1),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "allowed",
                "Roles or users allowed to react, as mentions",
            )),
        CreateCommand::new("list_reaction").description("List open reaction counts"),
        CreateCommand::new("remove_reaction")
            .description("Stop a reaction count")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message_id",
                    "Id of the counted message",
                )
                .required(true),
            ),
        CreateCommand::new("clear_reactions").description("Stop every reaction count of this server"),
    ]
}

pub async fn count(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_user(state, command).await?;

    let options = command.data.options();
    let target = get_integer(&options, "target")
        .filter(|t| *t > 0)
        .and_then(|t| i32::try_from(t).ok())
        .ok_or_else(|| AppError::BadRequest("The target must be greater than 0".to_string()))?;

    let mentions = get_str(&options, "allowed")
        .map(parse_mentions)
        .unwrap_or_default();
    let allowed_ids: Vec<u64> = mentions.iter().map(Mention::id).collect();
    let audience = if mentions.is_empty() {
        "everyone".to_string()
    } else {
        mentions.iter().map(Mention::display).collect::<Vec<_>>().join(" ")
    };

    let content = format!(
        "<@{}> started an aggregation\nTarget: {}\nAllowed: {}",
        command.user.id, target, audience
    );
    // The row is keyed by the response's id, so it can only be stored after the
    // response is posted. Reactions landing in between hit an untracked message and
    // are not counted.
    respond_text(ctx, command, content).await?;
    let message = command.get_response(&ctx.http).await?;

    ReactionAggregationService::new(&state.db)
        .create(CreateReactionAggregationParam {
            message_id: message.id.get(),
            guild_id,
            channel_id: command.channel_id.get(),
            command_message_id: message.id.get(),
            target_value: target,
            author_id: command.user.id.get(),
            allowed_ids: allowed_ids.clone(),
        })
        .await?;

    let url = message_url(guild_id, command.channel_id.get(), message.id.get());
    notify_opted_in_members(
        state,
        ctx,
        guild_id,
        &allowed_ids,
        format!("You have a new aggregation to react to\n{}", url),
    )
    .await;

    Ok(())
}

pub async fn list(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_user(state, command).await?;
    let aggregations = ReactionAggregationService::new(&state.db)
        .list(guild_id)
        .await?;

    if aggregations.is_empty() {
        return respond_text(ctx, command, "No open aggregation").await;
    }

    let timezone = &state.config.timezone;
    let mut embed = CreateEmbed::new()
        .title("Open aggregations")
        .color(LIST_COLOR);

    for aggregation in aggregations.iter().take(MAX_LISTED) {
        embed = embed.field(
            format!("{} ({})", aggregation.message_id, aggregation.progress_label()),
            format!(
                "By <@{}> at {}\nAllowed: {}\n{}",
                aggregation.author_id,
                format_local(aggregation.created_at, timezone),
                describe_allowed(&aggregation.allowed_ids),
                message_url(aggregation.guild_id, aggregation.channel_id, aggregation.message_id)
            ),
            false,
        );
    }

    if aggregations.len() > MAX_LISTED {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "and {} more",
            aggregations.len() - MAX_LISTED
        )));
    }

    respond(ctx, command, CreateInteractionResponseMessage::new().embed(embed)).await
}

pub async fn remove(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_manager(state, command).await?;

    let options = command.data.options();
    let message_id = get_str(&options, "message_id")
        .and_then(|id| id.trim().parse::<u64>().ok())
        .ok_or_else(|| AppError::BadRequest("Give the id of the counted message".to_string()))?;

    let removed = ReactionAggregationService::new(&state.db)
        .remove(guild_id, message_id)
        .await?;

    respond_text(
        ctx,
        command,
        format!(
            "Removed the aggregation\n{}",
            message_url(removed.guild_id, removed.channel_id, removed.message_id)
        ),
    )
    .await
}

pub async fn clear(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_manager(state, command).await?;

    let removed = ReactionAggregationService::new(&state.db)
        .clear(guild_id)
        .await?;

    respond_text(ctx, command, format!("Removed {} aggregations", removed)).await
}
