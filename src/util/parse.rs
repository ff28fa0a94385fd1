use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// A role or user reference typed by the invoker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mention {
    Role(u64),
    User(u64),
    /// A bare snowflake, which may name either a role or a user.
    Id(u64),
}

impl Mention {
    pub fn id(&self) -> u64 {
        match self {
            Mention::Role(id) | Mention::User(id) | Mention::Id(id) => *id,
        }
    }

    /// Chat rendering: a role or user mention, or the bare id in code formatting.
    pub fn display(&self) -> String {
        match self {
            Mention::Role(id) => format!("<@&{}>", id),
            Mention::User(id) => format!("<@{}>", id),
            Mention::Id(id) => format!("`{}`", id),
        }
    }
}

/// Extracts role and user mentions from free text.
///
/// Accepts `<@&id>` for roles, `<@id>` / `<@!id>` for users and bare numeric ids.
/// Separators (spaces, commas) are ignored and duplicates are dropped while keeping the
/// first occurrence order.
pub fn parse_mentions(input: &str) -> Vec<Mention> {
    let mut mentions: Vec<Mention> = Vec::new();

    for token in input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let mention = if let Some(inner) = token.strip_prefix("<@&").and_then(|t| t.strip_suffix('>')) {
            inner.parse().ok().map(Mention::Role)
        } else if let Some(inner) = token.strip_prefix("<@!").and_then(|t| t.strip_suffix('>')) {
            inner.parse().ok().map(Mention::User)
        } else if let Some(inner) = token.strip_prefix("<@").and_then(|t| t.strip_suffix('>')) {
            inner.parse().ok().map(Mention::User)
        } else {
            token.parse().ok().map(Mention::Id)
        };

        if let Some(mention) = mention.filter(|m| m.id() != 0) {
            if !mentions.iter().any(|m| m.id() == mention.id()) {
                mentions.push(mention);
            }
        }
    }

    mentions
}

/// Joins ids into the comma separated form stored in the database.
pub fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Splits a stored comma separated id list. An empty string yields no ids.
pub fn split_ids(value: &str) -> Result<Vec<u64>, AppError> {
    value
        .split(',')
        .filter(|part| !part.is_empty())
        .map(|part| parse_u64_from_string(part.to_string()))
        .collect()
}
