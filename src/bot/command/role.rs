use dioxus_logger::tracing;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateInteractionResponseMessage, GuildId, Permissions, ReactionType,
};

use super::{require_permissions, respond, respond_text};
use crate::{
    error::AppError,
    model::role_reaction::{CreateRoleReactionParam, JOIN_EMOJI, LEAVE_EMOJI},
    service::role_reaction::RoleReactionService,
    state::BotState,
    util::options::{get_role, get_user},
};

const ROLE_COLOR: u32 = 0xe67e22;

pub fn register() -> Vec<CreateCommand> {
    let member_and_role = |name: &str, description: &str| {
        CreateCommand::new(name)
            .description(description)
            .default_member_permissions(Permissions::MANAGE_ROLES)
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "member", "Target member")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::Role, "role", "Role").required(true),
            )
    };

    vec![
        member_and_role("add_role", "Give a role to a member"),
        member_and_role("remove_role", "Take a role from a member"),
        CreateCommand::new("add_role_by_reaction")
            .description("Post a message members react to for joining or leaving a role")
            .default_member_permissions(Permissions::MANAGE_ROLES)
            .add_option(
                CreateCommandOption::new(CommandOptionType::Role, "role", "Role to hand out")
                    .required(true),
            ),
    ]
}

pub async fn add_role(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    change_role(ctx, command, true).await
}

pub async fn remove_role(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    change_role(ctx, command, false).await
}

/// Grants or revokes a role. Discord failures, usually role hierarchy, are replied as is.
async fn change_role(ctx: &Context, command: &CommandInteraction, grant: bool) -> Result<(), AppError> {
    let guild_id = GuildId::new(require_permissions(command, Permissions::MANAGE_ROLES)?);

    let options = command.data.options();
    let (Some(user), Some(role)) = (get_user(&options, "member"), get_role(&options, "role")) else {
        return Err(AppError::BadRequest("A member and a role are required".to_string()));
    };

    let reason = format!("Requested by {}", command.user.name);
    let result = if grant {
        ctx.http
            .add_member_role(guild_id, user.id, role.id, Some(reason.as_str()))
            .await
    } else {
        ctx.http
            .remove_member_role(guild_id, user.id, role.id, Some(reason.as_str()))
            .await
    };

    let content = match result {
        Ok(()) if grant => format!("Gave <@&{}> to <@{}>", role.id, user.id),
        Ok(()) => format!("Took <@&{}> from <@{}>", role.id, user.id),
        Err(e) => {
            tracing::warn!("Failed to change role {} of {}: {}", role.id, user.id, e);
            format!("Failed to change the role: {}", e)
        }
    };

    respond_text(ctx, command, content).await
}

pub async fn add_role_by_reaction(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_permissions(command, Permissions::MANAGE_ROLES)?;

    let options = command.data.options();
    let Some(role) = get_role(&options, "role") else {
        return Err(AppError::BadRequest("A role is required".to_string()));
    };

    let embed = CreateEmbed::new()
        .title(format!("Role: {}", role.name))
        .description(format!(
            "{} to join <@&{}>\n{} to leave",
            JOIN_EMOJI, role.id, LEAVE_EMOJI
        ))
        .color(ROLE_COLOR);

    respond(ctx, command, CreateInteractionResponseMessage::new().embed(embed)).await?;
    let message = command.get_response(&ctx.http).await?;

    RoleReactionService::new(&state.db)
        .create(CreateRoleReactionParam {
            message_id: message.id.get(),
            guild_id,
            channel_id: command.channel_id.get(),
            role_id: role.id.get(),
            author_id: command.user.id.get(),
        })
        .await?;

    for emoji in [JOIN_EMOJI, LEAVE_EMOJI] {
        message
            .react(&ctx.http, ReactionType::Unicode(emoji.to_string()))
            .await?;
    }

    Ok(())
}
