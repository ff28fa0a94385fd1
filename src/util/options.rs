//! Typed accessors for resolved slash command options.

use serenity::all::{ResolvedOption, ResolvedValue, Role, User};

pub fn get_str<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    options.iter().find(|o| o.name == name).and_then(|o| match o.value {
        ResolvedValue::String(value) => Some(value),
        _ => None,
    })
}

pub fn get_integer(options: &[ResolvedOption<'_>], name: &str) -> Option<i64> {
    options.iter().find(|o| o.name == name).and_then(|o| match o.value {
        ResolvedValue::Integer(value) => Some(value),
        _ => None,
    })
}

pub fn get_role<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a Role> {
    options.iter().find(|o| o.name == name).and_then(|o| match o.value {
        ResolvedValue::Role(role) => Some(role),
        _ => None,
    })
}

pub fn get_user<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a User> {
    options.iter().find(|o| o.name == name).and_then(|o| match o.value {
        ResolvedValue::User(user, _) => Some(user),
        _ => None,
    })
}
