//! Domain models for reaction aggregation.
//!
//! An aggregation counts reactions on one bot message until `target_value` is reached.
//! Reactions whose emoji name contains `matte` ("wait") do not count; they pause
//! completion until every one of them has been withdrawn.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Line appended to the aggregation message for every active matte reaction.
pub const WAITING_LINE: &str = "\n⏸️ Waiting";

/// An open or recently completed reaction aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionAggregation {
    /// Message collecting the reactions.
    pub message_id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    /// Message that invoked the count command.
    pub command_message_id: u64,
    pub target_value: i32,
    pub sum: i32,
    /// Number of active matte reactions.
    pub matte: i32,
    pub author_id: u64,
    pub created_at: DateTime<Utc>,
    /// Set once the completion notice has been posted.
    pub notified_at: Option<DateTime<Utc>>,
    /// Set once the stale reminder has been posted.
    pub reminded: bool,
    /// Roles or users allowed to contribute. Empty means anyone may.
    pub allowed_ids: Vec<u64>,
}

impl ReactionAggregation {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(ReactionAggregation)` - Successfully converted model
    /// - `Err(DbErr::Custom)` - A stored id is not a valid u64
    pub fn from_entity(entity: entity::reaction_aggregation::Model) -> Result<Self, DbErr> {
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
            command_message_id: parse("command_message_id", &entity.command_message_id)?,
            target_value: entity.target_value,
            sum: entity.sum,
            matte: entity.matte,
            author_id: parse("author_id", &entity.author_id)?,
            created_at: entity.created_at,
            notified_at: entity.notified_at,
            reminded: entity.reminded,
            allowed_ids,
        })
    }

    /// Whether a member may contribute to this aggregation.
    ///
    /// Unrestricted aggregations accept everyone. Otherwise the member's user id or one
    /// of their role ids must be in `allowed_ids`.
    pub fn permits(&self, user_id: u64, role_ids: &[u64]) -> bool {
        self.allowed_ids.is_empty()
            || self.allowed_ids.contains(&user_id)
            || role_ids.iter().any(|id| self.allowed_ids.contains(id))
    }

    /// Whether the completion notice is due.
    pub fn is_complete(&self) -> bool {
        self.sum >= self.target_value && self.matte == 0 && self.notified_at.is_none()
    }

    /// Progress text such as `3/5`, with a waiting marker while paused.
    pub fn progress_label(&self) -> String {
        if self.matte > 0 {
            format!("{}/{} **waiting**", self.sum, self.target_value)
        } else {
            format!("{}/{}", self.sum, self.target_value)
        }
    }
}

/// How a reaction affects an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    /// Adds to the running sum.
    Count,
    /// Pauses completion.
    Matte,
}

impl ReactionKind {
    pub fn from_emoji_name(name: &str) -> Self {
        if name.contains("matte") {
            ReactionKind::Matte
        } else {
            ReactionKind::Count
        }
    }
}

/// Appends one waiting line to the aggregation message content.
pub fn add_waiting_line(content: &str) -> String {
    format!("{}{}", content, WAITING_LINE)
}

/// Removes one waiting line from the aggregation message content, if any.
pub fn remove_waiting_line(content: &str) -> String {
    content.replacen(WAITING_LINE, "", 1)
}

/// Parameters for starting a new aggregation.
#[derive(Debug, Clone)]
pub struct CreateReactionAggregationParam {
    pub message_id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub command_message_id: u64,
    pub target_value: i32,
    pub author_id: u64,
    pub allowed_ids: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregation(allowed_ids: Vec<u64>) -> ReactionAggregation {
        ReactionAggregation {
            message_id: 1,
            guild_id: 2,
            channel_id: 3,
            command_message_id: 4,
            target_value: 2,
            sum: 0,
            matte: 0,
            author_id: 5,
            created_at: Utc::now(),
            notified_at: None,
            reminded: false,
            allowed_ids,
        }
    }

    #[test]
    fn unrestricted_aggregation_permits_everyone() {
        assert!(aggregation(vec![]).permits(99, &[]));
    }

    #[test]
    fn restricted_aggregation_checks_roles_and_user() {
        let aggregation = aggregation(vec![10, 77]);

        assert!(aggregation.permits(1, &[10]));
        assert!(aggregation.permits(77, &[]));
        assert!(!aggregation.permits(1, &[11, 12]));
    }

    #[test]
    fn completes_only_at_target_without_matte() {
        let mut aggregation = aggregation(vec![]);
        aggregation.sum = 1;
        assert!(!aggregation.is_complete());

        aggregation.sum = 2;
        aggregation.matte = 1;
        assert!(!aggregation.is_complete());

        aggregation.matte = 0;
        assert!(aggregation.is_complete());

        aggregation.notified_at = Some(Utc::now());
        assert!(!aggregation.is_complete());
    }

    #[test]
    fn classifies_matte_emoji_by_name() {
        assert_eq!(ReactionKind::from_emoji_name("matte"), ReactionKind::Matte);
        assert_eq!(
            ReactionKind::from_emoji_name("matte_kudasai"),
            ReactionKind::Matte
        );
        assert_eq!(ReactionKind::from_emoji_name("👍"), ReactionKind::Count);
    }

    #[test]
    fn waiting_lines_are_added_and_removed_one_at_a_time() {
        let content = add_waiting_line(&add_waiting_line("Count started"));
        assert_eq!(content.matches(WAITING_LINE).count(), 2);

        let content = remove_waiting_line(&content);
        assert_eq!(content.matches(WAITING_LINE).count(), 1);

        let content = remove_waiting_line(&remove_waiting_line(&content));
        assert_eq!(content, "Count started");
    }

    #[test]
    fn progress_label_marks_waiting() {
        let mut aggregation = aggregation(vec![]);
        aggregation.sum = 1;
        assert_eq!(aggregation.progress_label(), "1/2");

        aggregation.matte = 1;
        assert_eq!(aggregation.progress_label(), "1/2 **waiting**");
    }
}
