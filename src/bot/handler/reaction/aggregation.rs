use chrono::Utc;
use dioxus_logger::tracing;
use serenity::all::{ChannelId, Context, CreateMessage, EditMessage, Reaction};

use super::Reactor;
use crate::{
    error::AppError,
    model::reaction_aggregation::{
        add_waiting_line, remove_waiting_line, ReactionAggregation, ReactionKind,
    },
    service::reaction_aggregation::{ReactionAggregationService, ReactionEvent, ReactionOutcome},
    state::BotState,
    util::message::{message_url, send_transient_warning},
};

pub(super) async fn on_add(
    state: &BotState,
    ctx: &Context,
    reaction: &Reaction,
    reactor: &Reactor,
) -> Result<bool, AppError> {
    let outcome = ReactionAggregationService::new(&state.db)
        .handle_add(event(reaction, reactor), Utc::now())
        .await?;

    apply(ctx, reaction, reactor, outcome, true).await
}

pub(super) async fn on_remove(
    state: &BotState,
    ctx: &Context,
    reaction: &Reaction,
    reactor: &Reactor,
) -> Result<bool, AppError> {
    let outcome = ReactionAggregationService::new(&state.db)
        .handle_remove(event(reaction, reactor), Utc::now())
        .await?;

    apply(ctx, reaction, reactor, outcome, false).await
}

fn event<'a>(reaction: &Reaction, reactor: &'a Reactor) -> ReactionEvent<'a> {
    ReactionEvent {
        message_id: reaction.message_id.get(),
        user_id: reactor.user_id,
        role_ids: &reactor.role_ids,
        emoji_name: &reactor.emoji,
    }
}

async fn apply(
    ctx: &Context,
    reaction: &Reaction,
    reactor: &Reactor,
    outcome: ReactionOutcome,
    added: bool,
) -> Result<bool, AppError> {
    match outcome {
        ReactionOutcome::Untracked => Ok(false),
        ReactionOutcome::Ignored => Ok(true),
        ReactionOutcome::Rejected(_) => {
            reaction.delete(ctx).await?;
            send_transient_warning(
                ctx.http.clone(),
                reaction.channel_id,
                format!("<@{}> you are not a target of this aggregation", reactor.user_id),
            )
            .await;

            Ok(true)
        }
        ReactionOutcome::Updated {
            aggregation,
            kind,
            completed,
        } => {
            if kind == ReactionKind::Matte {
                update_waiting_lines(ctx, reaction, added).await?;
            }
            if completed {
                notify_completion(ctx, &aggregation).await?;
            }

            Ok(true)
        }
    }
}

async fn update_waiting_lines(ctx: &Context, reaction: &Reaction, added: bool) -> Result<(), AppError> {
    let mut message = reaction
        .channel_id
        .message(&ctx.http, reaction.message_id)
        .await?;

    let content = if added {
        add_waiting_line(&message.content)
    } else {
        remove_waiting_line(&message.content)
    };

    message.edit(ctx, EditMessage::new().content(content)).await?;

    Ok(())
}

async fn notify_completion(ctx: &Context, aggregation: &ReactionAggregation) -> Result<(), AppError> {
    let url = message_url(
        aggregation.guild_id,
        aggregation.channel_id,
        aggregation.message_id,
    );

    ChannelId::new(aggregation.channel_id)
        .send_message(
            &ctx.http,
            CreateMessage::new().content(format!(
                "<@{}> The aggregation reached its target ({})\n{}",
                aggregation.author_id,
                aggregation.progress_label(),
                url
            )),
        )
        .await?;

    tracing::info!("Posted completion notice for aggregation {}", aggregation.message_id);

    Ok(())
}
