use chrono::Utc;
use dioxus_logger::tracing;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponseMessage, ReactionType,
};

use super::{require_bot_manager, require_bot_user, respond, respond_text};
use crate::{
    error::AppError,
    model::tweet::{CreateTweetParam, APPROVE_EMOJI},
    service::tweet::TweetService,
    state::BotState,
    util::{
        message::message_url,
        options::{get_integer, get_str},
        time::{format_local, to_discord_timestamp},
    },
};

const TWEET_COLOR: u32 = 0x1da1f2;
/// Tweets longer than this are refused by the API.
const MAX_TWEET_CHARS: usize = 280;

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("tweet")
            .description("Request a tweet, posted once an approver reacts")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "content", "Tweet text")
                    .required(true),
            ),
        CreateCommand::new("remove_tweet")
            .description("Withdraw a tweet request")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message_id",
                    "Id of the request message",
                )
                .required(true),
            ),
        CreateCommand::new("list_tweet")
            .description("List pending tweet requests")
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "page", "Page number")
                    .min_int_value(1),
            ),
    ]
}

/// Rejects the command unless the relay is configured for the guild.
fn require_relay(state: &BotState, guild_id: u64) -> Result<(), AppError> {
    if state.twitter.is_some() && state.config.tweets_enabled_in(guild_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Tweeting is not enabled in this server".to_string(),
        ))
    }
}

pub async fn tweet(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_manager(state, command).await?;
    require_relay(state, guild_id)?;

    let options = command.data.options();
    let Some(content) = get_str(&options, "content") else {
        return Err(AppError::BadRequest("Tweet text is required".to_string()));
    };
    if content.chars().count() > MAX_TWEET_CHARS {
        return Err(AppError::BadRequest(format!(
            "A tweet can be at most {} characters",
            MAX_TWEET_CHARS
        )));
    }

    let approver = state
        .config
        .tweet_approver_role_id
        .map(|id| format!("<@&{}>", id))
        .unwrap_or_else(|| "an approver".to_string());

    let embed = CreateEmbed::new()
        .title("Tweet request")
        .description(content)
        .field("Requested by", format!("<@{}>", command.user.id), false)
        .footer(CreateEmbedFooter::new(format!(
            "{} by an approver posts this tweet",
            APPROVE_EMOJI
        )))
        .timestamp(to_discord_timestamp(Utc::now())?)
        .color(TWEET_COLOR);

    respond(
        ctx,
        command,
        CreateInteractionResponseMessage::new()
            .content(format!("{} please review", approver))
            .embed(embed),
    )
    .await?;
    let message = command.get_response(&ctx.http).await?;

    TweetService::new(&state.db)
        .queue(CreateTweetParam {
            message_id: message.id.get(),
            guild_id,
            channel_id: command.channel_id.get(),
            author_id: command.user.id.get(),
            content: content.to_string(),
        })
        .await?;

    message
        .react(&ctx.http, ReactionType::Unicode(APPROVE_EMOJI.to_string()))
        .await?;

    Ok(())
}

pub async fn remove(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_user(state, command).await?;
    require_relay(state, guild_id)?;

    let options = command.data.options();
    let message_id = get_str(&options, "message_id")
        .and_then(|id| id.trim().parse::<u64>().ok())
        .ok_or_else(|| AppError::BadRequest("Give the id of the request message".to_string()))?;

    let removed = TweetService::new(&state.db)
        .remove(guild_id, message_id)
        .await?;

    if let Err(e) = command
        .channel_id
        .delete_reactions(&ctx.http, removed.message_id)
        .await
    {
        tracing::debug!("Failed to clear reactions of tweet {}: {}", removed.message_id, e);
    }

    respond_text(ctx, command, format!("Withdrew tweet request {}", removed.message_id)).await
}

pub async fn list(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_manager(state, command).await?;
    require_relay(state, guild_id)?;

    let options = command.data.options();
    let page = get_integer(&options, "page")
        .and_then(|p| u64::try_from(p).ok())
        .unwrap_or(1);

    let page = TweetService::new(&state.db).list(guild_id, page).await?;

    if page.total_items == 0 {
        return respond_text(ctx, command, "No tweet is waiting for approval").await;
    }

    let mut embed = CreateEmbed::new()
        .title(format!("Pending tweets ({})", page.total_items))
        .footer(CreateEmbedFooter::new(format!(
            "Page {}/{}",
            page.page, page.total_pages
        )))
        .color(TWEET_COLOR);

    for tweet in &page.tweets {
        embed = embed.field(
            format_local(tweet.created_at, &state.config.timezone),
            format!(
                "<@{}> {}\n{}",
                tweet.author_id,
                tweet.content,
                message_url(tweet.guild_id, tweet.channel_id, tweet.message_id)
            ),
            false,
        );
    }

    respond(ctx, command, CreateInteractionResponseMessage::new().embed(embed)).await
}
