use dioxus_logger::tracing;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    EditInteractionResponse, EditMember, GuildId, Permissions,
};

use super::{guild_id, require_permissions, respond_text};
use crate::{
    error::AppError,
    model::guild_setting::UpsertGuildSettingParam,
    service::guild_setting::GuildSettingService,
    state::BotState,
    util::options::{get_role, get_str},
};

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("s_init")
            .description("Set the roles allowed to manage and use the bot")
            .default_member_permissions(Permissions::BAN_MEMBERS)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Role,
                    "bot_manager_role",
                    "Role allowed to manage the bot",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Role,
                    "bot_user_role",
                    "Role allowed to use the bot",
                )
                .required(true),
            ),
        CreateCommand::new("s_state").description("Show the bot roles of this server"),
        CreateCommand::new("catalog").description("List the servers using this bot"),
        CreateCommand::new("sync_nickname")
            .description("Set your nickname in every server using this bot")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "name", "New nickname")
                    .required(true)
                    .max_length(32),
            ),
    ]
}

pub async fn init(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_permissions(command, Permissions::BAN_MEMBERS)?;

    let options = command.data.options();
    let (Some(manager), Some(user)) = (
        get_role(&options, "bot_manager_role"),
        get_role(&options, "bot_user_role"),
    ) else {
        return Err(AppError::BadRequest(
            "Both a manager role and a user role are required".to_string(),
        ));
    };

    let (setting, created) = GuildSettingService::new(&state.db)
        .init(UpsertGuildSettingParam {
            guild_id,
            bot_manager_role_id: manager.id.get(),
            bot_user_role_id: user.id.get(),
        })
        .await?;

    respond_text(
        ctx,
        command,
        format!(
            "Bot roles {}\nManager: <@&{}>\nUser: <@&{}>",
            if created { "set" } else { "updated" },
            setting.bot_manager_role_id,
            setting.bot_user_role_id
        ),
    )
    .await
}

pub async fn show(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let Some(guild_id) = guild_id(command) else {
        return Err(AppError::BadRequest(
            "This command can only be used in a server".to_string(),
        ));
    };

    let content = match GuildSettingService::new(&state.db).get(guild_id).await? {
        Some(setting) => format!(
            "Manager: <@&{}>\nUser: <@&{}>",
            setting.bot_manager_role_id, setting.bot_user_role_id
        ),
        None => "This server is not registered. Run `/s_init` first.".to_string(),
    };

    respond_text(ctx, command, content).await
}

pub async fn catalog(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let settings = GuildSettingService::new(&state.db).get_all().await?;

    if settings.is_empty() {
        return respond_text(ctx, command, "No server is registered yet").await;
    }

    let lines = settings
        .iter()
        .map(|s| {
            let name = ctx
                .cache
                .guild(GuildId::new(s.guild_id))
                .map(|g| g.name.clone())
                .unwrap_or_else(|| s.guild_id.to_string());
            format!("- {}", name)
        })
        .collect::<Vec<_>>()
        .join("\n");

    respond_text(ctx, command, lines).await
}

/// Applies the nickname guild by guild and reports the guilds where it failed.
pub async fn sync_nickname(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let options = command.data.options();
    let Some(name) = get_str(&options, "name") else {
        return Err(AppError::BadRequest("A nickname is required".to_string()));
    };

    command.defer_ephemeral(&ctx.http).await?;

    let settings = GuildSettingService::new(&state.db).get_all().await?;
    let visible: Vec<GuildId> = ctx.cache.guilds();

    let mut updated = 0;
    let mut failures = Vec::new();
    for setting in settings {
        let guild_id = GuildId::new(setting.guild_id);
        if !visible.contains(&guild_id) {
            continue;
        }

        match guild_id
            .edit_member(&ctx.http, command.user.id, EditMember::new().nickname(name))
            .await
        {
            Ok(_) => updated += 1,
            Err(e) => {
                tracing::warn!("Failed to set nickname of {} in {}: {}", command.user.id, guild_id, e);
                failures.push(format!("- {}: {}", guild_id, e));
            }
        }
    }

    let mut content = format!("Nickname set in {} servers", updated);
    if !failures.is_empty() {
        content.push_str("\nFailed:\n");
        content.push_str(&failures.join("\n"));
    }

    command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await?;

    Ok(())
}
