use dioxus_logger::tracing;
use serenity::all::{Context, GuildId, Reaction, RoleId, UserId};

use super::Reactor;
use crate::{
    error::AppError, model::role_reaction::RoleAction,
    service::role_reaction::RoleReactionService, state::BotState,
};

const AUDIT_REASON: &str = "Role reaction";

/// Grants or revokes the role of a role message.
pub(super) async fn on_change(
    state: &BotState,
    ctx: &Context,
    reaction: &Reaction,
    reactor: &Reactor,
    added: bool,
) -> Result<bool, AppError> {
    let Some(action) = RoleReactionService::new(&state.db)
        .action_for(reaction.message_id.get(), &reactor.emoji, added)
        .await?
    else {
        return Ok(false);
    };

    let guild_id = GuildId::new(reactor.guild_id);
    let user_id = UserId::new(reactor.user_id);

    match action {
        RoleAction::Grant(role_id) => {
            ctx.http
                .add_member_role(guild_id, user_id, RoleId::new(role_id), Some(AUDIT_REASON))
                .await?;
            tracing::info!("Granted role {} to {} in guild {}", role_id, user_id, guild_id);
        }
        RoleAction::Revoke(role_id) => {
            ctx.http
                .remove_member_role(guild_id, user_id, RoleId::new(role_id), Some(AUDIT_REASON))
                .await?;
            tracing::info!("Revoked role {} from {} in guild {}", role_id, user_id, guild_id);
        }
    }

    Ok(true)
}
