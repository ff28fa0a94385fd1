//! Reaction event dispatch.
//!
//! A message is at most one of: aggregation, poll, role message or queued tweet. Each
//! feature handler returns `Ok(true)` once it has recognized the message, which stops the
//! dispatch. Reactions by watched members also count as activity whatever the message.

mod aggregation;
mod polling;
mod role;
mod tweet;

use chrono::Utc;
use dioxus_logger::tracing;
use serenity::all::{Context, Reaction};

use crate::{
    error::AppError, service::inactivity::InactivityService, state::BotState,
    util::message::emoji_name,
};

/// The member behind a reaction event.
pub(super) struct Reactor {
    pub guild_id: u64,
    pub user_id: u64,
    pub role_ids: Vec<u64>,
    pub emoji: String,
}

pub async fn handle_reaction_add(state: &BotState, ctx: Context, reaction: Reaction) {
    let Some(reactor) = resolve_reactor(&ctx, &reaction).await else {
        return;
    };

    record_activity(state, reactor.user_id).await;

    if let Err(e) = dispatch_add(state, &ctx, &reaction, &reactor).await {
        tracing::error!(
            "Failed to handle reaction {} on message {}: {}",
            reactor.emoji,
            reaction.message_id,
            e
        );
    }
}

pub async fn handle_reaction_remove(state: &BotState, ctx: Context, reaction: Reaction) {
    let Some(reactor) = resolve_reactor(&ctx, &reaction).await else {
        return;
    };

    record_activity(state, reactor.user_id).await;

    if let Err(e) = dispatch_remove(state, &ctx, &reaction, &reactor).await {
        tracing::error!(
            "Failed to handle removal of {} on message {}: {}",
            reactor.emoji,
            reaction.message_id,
            e
        );
    }
}

async fn dispatch_add(
    state: &BotState,
    ctx: &Context,
    reaction: &Reaction,
    reactor: &Reactor,
) -> Result<(), AppError> {
    if aggregation::on_add(state, ctx, reaction, reactor).await? {
        return Ok(());
    }
    if polling::on_add(state, ctx, reaction, reactor).await? {
        return Ok(());
    }
    if role::on_change(state, ctx, reaction, reactor, true).await? {
        return Ok(());
    }
    tweet::on_add(state, ctx, reaction, reactor).await?;

    Ok(())
}

async fn dispatch_remove(
    state: &BotState,
    ctx: &Context,
    reaction: &Reaction,
    reactor: &Reactor,
) -> Result<(), AppError> {
    if aggregation::on_remove(state, ctx, reaction, reactor).await? {
        return Ok(());
    }
    role::on_change(state, ctx, reaction, reactor, false).await?;

    Ok(())
}

/// Resolves who reacted, skipping direct messages and bots.
///
/// Add events carry the member. Remove events do not, so the member is looked up through
/// the cache or the API.
async fn resolve_reactor(ctx: &Context, reaction: &Reaction) -> Option<Reactor> {
    let guild_id = reaction.guild_id?;
    let user_id = reaction.user_id?;

    let member = match &reaction.member {
        Some(member) => member.clone(),
        None => match guild_id.member(ctx, user_id).await {
            Ok(member) => member,
            Err(e) => {
                tracing::warn!("Failed to fetch member {} of guild {}: {}", user_id, guild_id, e);
                return None;
            }
        },
    };

    if member.user.bot {
        return None;
    }

    Some(Reactor {
        guild_id: guild_id.get(),
        user_id: user_id.get(),
        role_ids: member.roles.iter().map(|id| id.get()).collect(),
        emoji: emoji_name(&reaction.emoji),
    })
}

async fn record_activity(state: &BotState, user_id: u64) {
    if let Err(e) = InactivityService::new(&state.db)
        .record_reaction(user_id, Utc::now())
        .await
    {
        tracing::error!("Failed to record reaction by {}: {}", user_id, e);
    }
}
