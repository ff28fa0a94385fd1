//! Slash commands, grouped by feature.
//!
//! Every command returns `Result<(), AppError>` and sends its own response. `dispatch`
//! turns errors into an ephemeral reply using `AppError::user_message`, so a failing
//! command never leaves the interaction unanswered.

pub mod admin;
pub mod aggregation;
pub mod announce;
pub mod dm_notification;
pub mod inactivity;
pub mod polling;
pub mod reminder;
pub mod role;
pub mod setting;
pub mod tweet;

use dioxus_logger::tracing;
use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, GuildId, Member,
    Permissions, UserId,
};

use crate::{
    error::AppError,
    service::permission::PermissionService,
    state::BotState,
    util::parse::Mention,
};

/// Page size when listing guild members.
const MEMBER_PAGE_SIZE: u64 = 1000;

/// Every slash command the bot registers.
pub fn register_all() -> Vec<CreateCommand> {
    [
        setting::register(),
        aggregation::register(),
        polling::register(),
        reminder::register(),
        role::register(),
        inactivity::register(),
        tweet::register(),
        admin::register(),
        announce::register(),
        dm_notification::register(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Runs the command named by the interaction.
pub async fn dispatch(state: &BotState, ctx: &Context, command: &CommandInteraction) {
    tracing::debug!(
        "Command /{} by {} in guild {:?}",
        command.data.name,
        command.user.id,
        command.guild_id
    );

    let result = match command.data.name.as_str() {
        "s_init" => setting::init(state, ctx, command).await,
        "s_state" => setting::show(state, ctx, command).await,
        "catalog" => setting::catalog(state, ctx, command).await,
        "sync_nickname" => setting::sync_nickname(state, ctx, command).await,
        "count" => aggregation::count(state, ctx, command).await,
        "list_reaction" => aggregation::list(state, ctx, command).await,
        "remove_reaction" => aggregation::remove(state, ctx, command).await,
        "clear_reactions" => aggregation::clear(state, ctx, command).await,
        "poll" => polling::poll(state, ctx, command).await,
        "remind" => reminder::remind(state, ctx, command).await,
        "list_reminder" => reminder::list(state, ctx, command).await,
        "remove_reminder" => reminder::remove(state, ctx, command).await,
        "add_role" => role::add_role(ctx, command).await,
        "remove_role" => role::remove_role(ctx, command).await,
        "add_role_by_reaction" => role::add_role_by_reaction(state, ctx, command).await,
        "register_watching" => inactivity::register_watching(state, ctx, command).await,
        "remove_watching" => inactivity::remove_watching(state, ctx, command).await,
        "activate" => inactivity::activate(state, ctx, command).await,
        "inactivate" => inactivity::inactivate(state, ctx, command).await,
        "check_active" => inactivity::check(state, ctx, command, false).await,
        "check_inactive" => inactivity::check(state, ctx, command, true).await,
        "tweet" => tweet::tweet(state, ctx, command).await,
        "remove_tweet" => tweet::remove(state, ctx, command).await,
        "list_tweet" => tweet::list(state, ctx, command).await,
        "ping" => admin::ping(ctx, command).await,
        "num_of_member" => admin::num_of_member(ctx, command).await,
        "status" => admin::status(ctx, command).await,
        "where" => admin::where_(ctx, command).await,
        "back_up" => admin::back_up(state, ctx, command).await,
        "announce" => announce::announce(ctx, command).await,
        "announce_edit" => announce::announce_edit(ctx, command).await,
        "dm_notification_config" => dm_notification::config(state, ctx, command).await,
        name => Err(AppError::NotFound(format!("Unknown command /{}", name))),
    };

    if let Err(e) = result {
        report_error(ctx, command, e).await;
    }
}

/// Replies with the user-facing message of `error`, as a follow-up if the command
/// already responded.
async fn report_error(ctx: &Context, command: &CommandInteraction, error: AppError) {
    let message = error.user_message();

    if respond_ephemeral(ctx, command, message.clone()).await.is_ok() {
        return;
    }

    if let Err(e) = command
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content(message)
                .ephemeral(true),
        )
        .await
    {
        tracing::error!("Failed to report error for /{}: {}", command.data.name, e);
    }
}

pub(crate) async fn respond(
    ctx: &Context,
    command: &CommandInteraction,
    message: CreateInteractionResponseMessage,
) -> Result<(), AppError> {
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;

    Ok(())
}

pub(crate) async fn respond_text(
    ctx: &Context,
    command: &CommandInteraction,
    content: impl Into<String>,
) -> Result<(), AppError> {
    respond(
        ctx,
        command,
        CreateInteractionResponseMessage::new().content(content),
    )
    .await
}

pub(crate) async fn respond_ephemeral(
    ctx: &Context,
    command: &CommandInteraction,
    content: impl Into<String>,
) -> Result<(), AppError> {
    respond(
        ctx,
        command,
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
    .await
}

pub(crate) fn guild_id(command: &CommandInteraction) -> Option<u64> {
    command.guild_id.map(|id| id.get())
}

/// Role ids of the invoking member, empty outside a guild.
pub(crate) fn invoker_roles(command: &CommandInteraction) -> Vec<u64> {
    command
        .member
        .as_ref()
        .map(|m| m.roles.iter().map(|id| id.get()).collect())
        .unwrap_or_default()
}

pub(crate) async fn require_bot_user(
    state: &BotState,
    command: &CommandInteraction,
) -> Result<u64, AppError> {
    PermissionService::new(&state.db)
        .require_bot_user(guild_id(command), &invoker_roles(command))
        .await
}

pub(crate) async fn require_bot_manager(
    state: &BotState,
    command: &CommandInteraction,
) -> Result<u64, AppError> {
    PermissionService::new(&state.db)
        .require_bot_manager(guild_id(command), &invoker_roles(command))
        .await
}

/// Requires Discord permissions of the invoking member and returns the guild id.
pub(crate) fn require_permissions(
    command: &CommandInteraction,
    required: Permissions,
) -> Result<u64, AppError> {
    let granted = command
        .member
        .as_ref()
        .and_then(|m| m.permissions)
        .unwrap_or_else(Permissions::empty);

    match guild_id(command) {
        Some(id) if granted.contains(required) => Ok(id),
        _ => Err(AppError::Forbidden(format!(
            "This command requires the {} permission",
            required
        ))),
    }
}

/// Requires the invoker to own the bot application.
pub(crate) async fn require_owner(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let info = ctx.http.get_current_application_info().await?;

    let is_owner = info.owner.as_ref().is_some_and(|u| u.id == command.user.id)
        || info
            .team
            .as_ref()
            .is_some_and(|team| team.members.iter().any(|m| m.user.id == command.user.id));

    if is_owner {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "This command is limited to the bot owner".to_string(),
        ))
    }
}

/// Lists every member of a guild, following pagination.
pub(crate) async fn fetch_members(ctx: &Context, guild_id: u64) -> Result<Vec<Member>, AppError> {
    let guild_id = GuildId::new(guild_id);
    let mut members = Vec::new();
    let mut after: Option<UserId> = None;

    loop {
        let page = guild_id
            .members(&ctx.http, Some(MEMBER_PAGE_SIZE), after)
            .await?;
        let last = page.last().map(|m| m.user.id);
        let done = (page.len() as u64) < MEMBER_PAGE_SIZE;

        members.extend(page);

        match last {
            Some(id) if !done => after = Some(id),
            _ => break,
        }
    }

    Ok(members)
}

/// Expands role and user mentions to the ids of human members.
///
/// Bare ids are treated as roles when the guild has such a role, otherwise as users.
/// The result keeps the first occurrence of each member.
pub(crate) async fn expand_mentions(
    ctx: &Context,
    guild_id: u64,
    mentions: &[Mention],
) -> Result<Vec<u64>, AppError> {
    let has_bare_ids = mentions.iter().any(|m| matches!(m, Mention::Id(_)));
    let guild_roles = if has_bare_ids {
        GuildId::new(guild_id).roles(&ctx.http).await?
    } else {
        Default::default()
    };

    let mut role_ids = Vec::new();
    let mut user_ids = Vec::new();
    for mention in mentions {
        match mention {
            Mention::Role(id) => role_ids.push(*id),
            Mention::User(id) => user_ids.push(*id),
            Mention::Id(id) if guild_roles.keys().any(|r| r.get() == *id) => role_ids.push(*id),
            Mention::Id(id) => user_ids.push(*id),
        }
    }

    if !role_ids.is_empty() {
        for member in fetch_members(ctx, guild_id).await? {
            if !member.user.bot && member.roles.iter().any(|r| role_ids.contains(&r.get())) {
                user_ids.push(member.user.id.get());
            }
        }
    }

    let mut seen = Vec::with_capacity(user_ids.len());
    for id in user_ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }

    Ok(seen)
}

/// Renders an id list as code-formatted ids, or `everyone` when empty.
pub(crate) fn describe_allowed(ids: &[u64]) -> String {
    if ids.is_empty() {
        return "everyone".to_string();
    }

    ids.iter()
        .map(|id| format!("`{}`", id))
        .collect::<Vec<_>>()
        .join(", ")
}
