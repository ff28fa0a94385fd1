//! DM opt-in for aggregation targets.
//!
//! `/dm_notification_config` posts one toggle button per eligible role. Clicks are
//! handled in `bot::handler::interaction`, which redraws the clicked button with
//! `toggle_button`.

use std::collections::HashMap;

use dioxus_logger::tracing;
use serenity::all::{
    ButtonStyle, CommandInteraction, Context, CreateActionRow, CreateButton, CreateCommand,
    CreateInteractionResponseMessage, CreateMessage, GuildId, Member, Role, RoleId, UserId,
};

use super::{fetch_members, require_bot_manager, respond};
use crate::{
    error::AppError,
    model::dm_notification_role::dm_toggle_custom_id,
    service::dm_notification::{DmNotificationService, GuildRoleSummary},
    state::BotState,
};

/// Discord allows at most this many buttons in one action row.
const BUTTONS_PER_ROW: usize = 5;

pub fn register() -> Vec<CreateCommand> {
    vec![CreateCommand::new("dm_notification_config")
        .description("Choose which roles are sent a DM when an aggregation targets them")]
}

/// Button for a role. Enabled roles are drawn red, disabled ones green.
pub fn toggle_button(guild_id: u64, role_id: u64, label: &str, enabled: bool) -> CreateButton {
    CreateButton::new(dm_toggle_custom_id(guild_id, role_id))
        .label(toggle_label(label, enabled))
        .style(if enabled {
            ButtonStyle::Danger
        } else {
            ButtonStyle::Success
        })
}

/// Role name followed by the current state, replacing any previous state suffix.
fn toggle_label(label: &str, enabled: bool) -> String {
    let name = label
        .strip_suffix(" ON")
        .or_else(|| label.strip_suffix(" OFF"))
        .unwrap_or(label);

    format!("{} {}", name, if enabled { "ON" } else { "OFF" })
}

pub async fn config(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_manager(state, command).await?;

    let roles = GuildId::new(guild_id).roles(&ctx.http).await?;
    let members = fetch_members(ctx, guild_id).await?;

    let summaries = role_summaries(guild_id, &roles, &members);

    let panel = DmNotificationService::new(&state.db)
        .toggle_panel(guild_id, summaries)
        .await?;

    if panel.is_empty() {
        return respond(
            ctx,
            command,
            CreateInteractionResponseMessage::new()
                .content("No role in this server can receive DM notifications")
                .ephemeral(true),
        )
        .await;
    }

    let rows = panel
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| {
            CreateActionRow::Buttons(
                chunk
                    .iter()
                    .map(|(role, setting)| {
                        toggle_button(guild_id, role.role_id, &role.name, setting.enable_dm)
                    })
                    .collect(),
            )
        })
        .collect();

    respond(
        ctx,
        command,
        CreateInteractionResponseMessage::new()
            .content("Members of roles marked ON get a DM when an aggregation names them")
            .components(rows),
    )
    .await
}

/// Summarizes guild roles with their member counts, highest role first.
fn role_summaries(
    guild_id: u64,
    roles: &HashMap<RoleId, Role>,
    members: &[Member],
) -> Vec<GuildRoleSummary> {
    let mut member_counts: HashMap<RoleId, usize> = HashMap::new();
    for member in members {
        for role_id in &member.roles {
            *member_counts.entry(*role_id).or_default() += 1;
        }
    }

    let mut sorted: Vec<&Role> = roles.values().collect();
    sorted.sort_by_key(|role| std::cmp::Reverse(role.position));

    sorted
        .into_iter()
        .map(|role| GuildRoleSummary {
            role_id: role.id.get(),
            name: role.name.clone(),
            member_count: member_counts.get(&role.id).copied().unwrap_or(0),
            is_everyone: role.id.get() == guild_id,
        })
        .collect()
}

/// Human members holding at least one of `role_ids`.
fn recipients(members: &[Member], role_ids: &[u64]) -> Vec<UserId> {
    members
        .iter()
        .filter(|m| !m.user.bot && m.roles.iter().any(|r| role_ids.contains(&r.get())))
        .map(|m| m.user.id)
        .collect()
}

/// Sends `content` by DM to members of the opted-in roles among `role_ids`.
///
/// Failures are logged and never fail the calling command.
pub(crate) async fn notify_opted_in_members(
    state: &BotState,
    ctx: &Context,
    guild_id: u64,
    role_ids: &[u64],
    content: String,
) {
    if role_ids.is_empty() {
        return;
    }

    let targets = match DmNotificationService::new(&state.db)
        .enabled_targets(guild_id, role_ids)
        .await
    {
        Ok(targets) if !targets.is_empty() => targets,
        Ok(_) => return,
        Err(e) => {
            tracing::error!("Failed to load DM targets for guild {}: {}", guild_id, e);
            return;
        }
    };

    let members = match fetch_members(ctx, guild_id).await {
        Ok(members) => members,
        Err(e) => {
            tracing::error!("Failed to list members of guild {}: {}", guild_id, e);
            return;
        }
    };

    for user_id in recipients(&members, &targets) {
        if let Err(e) = user_id
            .direct_message(&ctx.http, CreateMessage::new().content(content.clone()))
            .await
        {
            tracing::warn!("Failed to DM member {}: {}", user_id, e);
        }
    }
}
