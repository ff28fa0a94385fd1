//! Domain models for reaction polls.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Reaction that closes a poll.
pub const FINISH_EMOJI: &str = "✅";
/// Choices of a poll created without explicit options.
pub const YES_EMOJI: &str = "⭕";
pub const NO_EMOJI: &str = "❌";
/// Upper bound on explicit poll choices, one per keycap emoji.
pub const MAX_CHOICES: usize = 10;

/// An open poll.
#[derive(Debug, Clone, PartialEq)]
pub struct Polling {
    pub message_id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub question: String,
    pub created_at: DateTime<Utc>,
    /// Roles or users allowed to vote. Empty means anyone may.
    pub allowed_ids: Vec<u64>,
}

impl Polling {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::polling::Model) -> Result<Self, DbErr> {
        let parse = |field: &str, value: &str| {
            value
                .parse::<u64>()
                .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
        };

        let allowed_ids = entity
            .allowed_ids
            .split(',')
            .filter(|id| !id.is_empty())
            .map(|id| parse("allowed_ids", id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            message_id: parse("message_id", &entity.message_id)?,
            guild_id: parse("guild_id", &entity.guild_id)?,
            channel_id: parse("channel_id", &entity.channel_id)?,
            author_id: parse("author_id", &entity.author_id)?,
            question: entity.question,
            created_at: entity.created_at,
            allowed_ids,
        })
    }

    /// Whether a member may vote in this poll.
    pub fn permits(&self, user_id: u64, role_ids: &[u64]) -> bool {
        self.allowed_ids.is_empty()
            || self.allowed_ids.contains(&user_id)
            || role_ids.iter().any(|id| self.allowed_ids.contains(id))
    }
}

/// Keycap emoji for choice `index` (0 to 9).
pub fn keycap_emoji(index: usize) -> String {
    format!("{}\u{FE0F}\u{20E3}", index)
}

/// A choice offered by a poll, paired with the reaction used to vote for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PollChoice {
    pub emoji: String,
    pub label: String,
}

/// Builds the choice list from the comma separated `choices` option.
///
/// # Returns
/// - `Ok(Vec<PollChoice>)` - ⭕/❌ when no choices are given, otherwise one keycap per choice
/// - `Err(String)` - More than `MAX_CHOICES` choices were given
pub fn build_choices(choices: Option<&str>) -> Result<Vec<PollChoice>, String> {
    let labels: Vec<&str> = choices
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();

    if labels.is_empty() {
        return Ok(vec![
            PollChoice {
                emoji: YES_EMOJI.to_string(),
                label: "Yes".to_string(),
            },
            PollChoice {
                emoji: NO_EMOJI.to_string(),
                label: "No".to_string(),
            },
        ]);
    }

    if labels.len() > MAX_CHOICES {
        return Err(format!("Please give at most {} choices", MAX_CHOICES));
    }

    Ok(labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| PollChoice {
            emoji: keycap_emoji(i),
            label: label.to_string(),
        })
        .collect())
}

/// Counts votes from the reactions present on a poll message.
///
/// Each entry is `(emoji, count, me)` where `me` tells whether the bot's own reaction is
/// included in `count`. The finish reaction is not a choice and is skipped.
pub fn tally_votes(reactions: impl IntoIterator<Item = (String, u64, bool)>) -> Vec<(String, u64)> {
    reactions
        .into_iter()
        .filter(|(emoji, _, _)| emoji != FINISH_EMOJI)
        .map(|(emoji, count, me)| {
            let votes = if me { count.saturating_sub(1) } else { count };
            (emoji, votes)
        })
        .collect()
}

/// Renders the choice list shown in the poll embed, one `emoji label` per line.
pub fn render_choices(choices: &[PollChoice]) -> String {
    choices
        .iter()
        .map(|c| format!("{} {}", c.emoji, c.label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Finds the label of `emoji` in a list produced by `render_choices`.
pub fn choice_label<'a>(rendered: &'a str, emoji: &str) -> Option<&'a str> {
    rendered.lines().find_map(|line| {
        line.strip_prefix(emoji)
            .and_then(|rest| rest.strip_prefix(' '))
    })
}

/// Parameters for storing a new poll.
#[derive(Debug, Clone)]
pub struct CreatePollingParam {
    pub message_id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub question: String,
    pub allowed_ids: Vec<u64>,
}
