use chrono::Utc;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponseMessage, ReactionType,
};

use super::{require_bot_user, respond};
use crate::{
    error::AppError,
    model::polling::{build_choices, render_choices, CreatePollingParam, FINISH_EMOJI},
    service::polling::PollingService,
    state::BotState,
    util::{
        options::get_str,
        parse::{parse_mentions, Mention},
        time::format_local,
    },
};

const POLL_COLOR: u32 = 0x9b59b6;

pub fn register() -> Vec<CreateCommand> {
    vec![CreateCommand::new("poll")
        .description("Start a poll")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "question", "What to ask")
                .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "choices",
            "Comma separated choices, at most 10. Yes/No when omitted",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "allowed",
            "Roles or users allowed to vote, as mentions",
        ))]
}

/// Posts the poll and adds one reaction per choice plus the finish reaction.
pub async fn poll(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_user(state, command).await?;

    let options = command.data.options();
    let Some(question) = get_str(&options, "question") else {
        return Err(AppError::BadRequest("A question is required".to_string()));
    };
    let choices = build_choices(get_str(&options, "choices")).map_err(AppError::BadRequest)?;

    let mentions = get_str(&options, "allowed")
        .map(parse_mentions)
        .unwrap_or_default();
    let audience = if mentions.is_empty() {
        "everyone".to_string()
    } else {
        mentions.iter().map(Mention::display).collect::<Vec<_>>().join(" ")
    };

    let embed = CreateEmbed::new()
        .title(question)
        .description(render_choices(&choices))
        .field("Voters", audience, false)
        .footer(CreateEmbedFooter::new(format!(
            "Started {} | {} to finish",
            format_local(Utc::now(), &state.config.timezone),
            FINISH_EMOJI
        )))
        .color(POLL_COLOR);

    respond(ctx, command, CreateInteractionResponseMessage::new().embed(embed)).await?;
    let message = command.get_response(&ctx.http).await?;

    PollingService::new(&state.db)
        .create(CreatePollingParam {
            message_id: message.id.get(),
            guild_id,
            channel_id: command.channel_id.get(),
            author_id: command.user.id.get(),
            question: question.to_string(),
            allowed_ids: mentions.iter().map(Mention::id).collect(),
        })
        .await?;

    for emoji in choices
        .iter()
        .map(|c| c.emoji.as_str())
        .chain(std::iter::once(FINISH_EMOJI))
    {
        message
            .react(&ctx.http, ReactionType::Unicode(emoji.to_string()))
            .await?;
    }

    Ok(())
}
