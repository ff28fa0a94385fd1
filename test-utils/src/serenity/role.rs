//! Test factory for creating Serenity Role objects.

use serenity::all::Role;

/// Creates a test Serenity Role with the given id, name and hierarchy position.
///
/// All other fields are set to defaults: no colour, not hoisted, not managed and with
/// zero permissions.
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// let role = create_test_role(123456789, "Night shift", 3);
/// assert_eq!(role.name, "Night shift");
/// ```
pub fn create_test_role(role_id: u64, name: &str, position: i16) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": 0,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": "0",
        "managed": false,
        "mentionable": true,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}
