use dioxus_logger::tracing;
use serenity::all::{Context, CreateEmbed, CreateMessage, EditMessage, Reaction};

use super::Reactor;
use crate::{
    error::AppError,
    model::tweet::{QueuedTweet, TweetPostResult, APPROVE_EMOJI},
    service::tweet::TweetService,
    state::BotState,
    util::message::send_transient_warning,
};

/// Approves queued tweets. Only members with the approver role may react.
pub(super) async fn on_add(
    state: &BotState,
    ctx: &Context,
    reaction: &Reaction,
    reactor: &Reactor,
) -> Result<bool, AppError> {
    let Some(twitter) = &state.twitter else {
        return Ok(false);
    };

    let service = TweetService::new(&state.db);
    let Some(tweet) = service.find(reaction.message_id.get()).await? else {
        return Ok(false);
    };

    let is_approver = state
        .config
        .tweet_approver_role_id
        .is_some_and(|role_id| reactor.role_ids.contains(&role_id));

    if !is_approver {
        reaction.delete(ctx).await?;
        send_transient_warning(
            ctx.http.clone(),
            reaction.channel_id,
            format!("<@{}> only approvers can react to tweet requests", reactor.user_id),
        )
        .await;

        return Ok(true);
    }

    if reactor.emoji != APPROVE_EMOJI {
        return Ok(true);
    }

    // Claiming first keeps a double approval from posting twice.
    if !service.claim(tweet.message_id).await? {
        return Ok(true);
    }

    let result = match twitter.post_tweet(&tweet.content).await {
        Ok(result) => result,
        Err(e) => {
            service.requeue(&tweet).await?;
            return Err(e);
        }
    };

    match result {
        TweetPostResult::Posted { tweet_id } => {
            tracing::info!(
                "Tweet {} approved by {} and posted as {:?}",
                tweet.message_id,
                reactor.user_id,
                tweet_id
            );
            mark_tweeted(ctx, reaction, reactor, tweet_id.as_deref()).await?;
        }
        TweetPostResult::Rejected { status } => {
            tracing::warn!("Twitter rejected tweet {} with status {}", tweet.message_id, status);
            service.requeue(&tweet).await?;
            report_failure(ctx, reaction, &tweet, status).await?;
        }
    }

    Ok(true)
}

async fn mark_tweeted(
    ctx: &Context,
    reaction: &Reaction,
    reactor: &Reactor,
    tweet_id: Option<&str>,
) -> Result<(), AppError> {
    let mut message = reaction
        .channel_id
        .message(&ctx.http, reaction.message_id)
        .await?;

    let embed = message
        .embeds
        .first()
        .cloned()
        .map(CreateEmbed::from)
        .unwrap_or_default()
        .field("Tweeted", tweeted_value(tweet_id), false)
        .field("Approved by", format!("<@{}>", reactor.user_id), false);

    message.edit(ctx, EditMessage::new().embed(embed)).await?;

    reaction
        .channel_id
        .delete_reactions(&ctx.http, reaction.message_id)
        .await?;

    Ok(())
}

async fn report_failure(
    ctx: &Context,
    reaction: &Reaction,
    tweet: &QueuedTweet,
    status: u16,
) -> Result<(), AppError> {
    reaction
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .content(format!(
                    "<@{}> Posting the tweet failed (status {})",
                    tweet.author_id, status
                ))
                .reference_message((reaction.channel_id, reaction.message_id)),
        )
        .await?;

    Ok(())
}

fn tweeted_value(tweet_id: Option<&str>) -> String {
    match tweet_id {
        Some(id) => format!("https://twitter.com/i/web/status/{}", id),
        None => "yes".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_the_tweet_when_its_id_is_known() {
        assert_eq!(
            tweeted_value(Some("1445880548472328192")),
            "https://twitter.com/i/web/status/1445880548472328192"
        );
        assert_eq!(tweeted_value(None), "yes");
    }
}
