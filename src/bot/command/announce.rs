use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateMessage, EditMessage, MessageId, Permissions,
};

use super::{require_permissions, respond_ephemeral};
use crate::{error::AppError, util::options::get_str};

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("announce")
            .description("Post a message as the bot in this channel")
            .default_member_permissions(Permissions::BAN_MEMBERS)
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "message", "Message to post")
                    .required(true),
            ),
        CreateCommand::new("announce_edit")
            .description("Edit a message the bot posted in this channel")
            .default_member_permissions(Permissions::BAN_MEMBERS)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message_id",
                    "Id of the bot message",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "content", "New content")
                    .required(true),
            ),
    ]
}

pub async fn announce(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    require_permissions(command, Permissions::BAN_MEMBERS)?;

    let options = command.data.options();
    let Some(content) = get_str(&options, "message") else {
        return Err(AppError::BadRequest("A message is required".to_string()));
    };

    let message = command
        .channel_id
        .send_message(&ctx.http, CreateMessage::new().content(content))
        .await?;

    respond_ephemeral(ctx, command, format!("Posted message {}", message.id)).await
}

/// Replaces the content of a message. Messages by anyone but the bot are refused.
pub async fn announce_edit(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    require_permissions(command, Permissions::BAN_MEMBERS)?;

    let options = command.data.options();
    let (Some(message_id), Some(content)) = (
        get_str(&options, "message_id").and_then(|id| id.trim().parse::<u64>().ok()),
        get_str(&options, "content"),
    ) else {
        return Err(AppError::BadRequest(
            "A message id and new content are required".to_string(),
        ));
    };
    if message_id == 0 {
        return Err(AppError::BadRequest("Invalid message id".to_string()));
    }

    let mut message = command
        .channel_id
        .message(&ctx.http, MessageId::new(message_id))
        .await
        .map_err(|_| AppError::NotFound(format!("Message {} not found in this channel", message_id)))?;

    let bot_id = ctx.cache.current_user().id;
    if message.author.id != bot_id {
        return Err(AppError::Forbidden(
            "Only messages posted by the bot can be edited".to_string(),
        ));
    }

    message
        .edit(&ctx.http, EditMessage::new().content(content))
        .await?;

    respond_ephemeral(ctx, command, format!("Edited message {}", message_id)).await
}
