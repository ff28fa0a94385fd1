use serenity::all::{Context, CreateEmbed, CreateMessage, Reaction};

use super::Reactor;
use crate::{
    error::AppError,
    model::polling::{choice_label, tally_votes, Polling},
    service::polling::{PollReactionOutcome, PollingService},
    state::BotState,
    util::message::{emoji_name, send_transient_warning},
};

const RESULT_COLOR: u32 = 0x2ecc71;

pub(super) async fn on_add(
    state: &BotState,
    ctx: &Context,
    reaction: &Reaction,
    reactor: &Reactor,
) -> Result<bool, AppError> {
    let service = PollingService::new(&state.db);
    let outcome = service
        .handle_add(
            reaction.message_id.get(),
            reactor.user_id,
            &reactor.role_ids,
            &reactor.emoji,
        )
        .await?;

    match outcome {
        PollReactionOutcome::Untracked => Ok(false),
        PollReactionOutcome::Vote => Ok(true),
        PollReactionOutcome::Rejected(_) => {
            reaction.delete(ctx).await?;
            send_transient_warning(
                ctx.http.clone(),
                reaction.channel_id,
                format!("<@{}> you are not a target of this poll", reactor.user_id),
            )
            .await;

            Ok(true)
        }
        PollReactionOutcome::FinishDenied(_) => {
            reaction.delete(ctx).await?;

            Ok(true)
        }
        PollReactionOutcome::Finish(polling) => {
            // Another finish event may have closed the poll already.
            if service.close(polling.message_id).await? {
                post_results(ctx, reaction, &polling).await?;
            }

            Ok(true)
        }
    }
}

async fn post_results(ctx: &Context, reaction: &Reaction, polling: &Polling) -> Result<(), AppError> {
    let message = reaction
        .channel_id
        .message(&ctx.http, reaction.message_id)
        .await?;

    let choices = message
        .embeds
        .first()
        .and_then(|embed| embed.description.clone())
        .unwrap_or_default();

    let results = tally_votes(
        message
            .reactions
            .iter()
            .map(|r| (emoji_name(&r.reaction_type), r.count, r.me)),
    );

    let lines = results
        .iter()
        .map(|(emoji, votes)| match choice_label(&choices, emoji) {
            Some(label) => format!("{} {}: **{}**", emoji, label, votes),
            None => format!("{}: **{}**", emoji, votes),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let embed = CreateEmbed::new()
        .title(format!("Results: {}", polling.question))
        .description(lines)
        .color(RESULT_COLOR);

    reaction
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).reference_message(&message),
        )
        .await?;

    reaction
        .channel_id
        .delete_reactions(&ctx.http, reaction.message_id)
        .await?;

    Ok(())
}
