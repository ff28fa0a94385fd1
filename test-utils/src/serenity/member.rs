//! Test factory for creating Serenity Member objects.

use serenity::all::Member;

/// Creates a guild member holding the given roles.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user_id` - Member's user id
/// - `role_ids` - Roles assigned to the member
/// - `bot` - Whether the underlying user is a bot account
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(guild_id: u64, user_id: u64, role_ids: &[u64], bot: bool) -> Member {
    let roles: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

    serde_json::from_value(serde_json::json!({
        "user": {
            "id": user_id.to_string(),
            "username": format!("user{}", user_id),
            "discriminator": "0",
            "global_name": null,
            "avatar": null,
            "bot": bot,
        },
        "nick": null,
        "avatar": null,
        "roles": roles,
        "joined_at": "2026-01-01T00:00:00+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "communication_disabled_until": null,
        "guild_id": guild_id.to_string(),
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
