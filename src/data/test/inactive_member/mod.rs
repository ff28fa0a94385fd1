use crate::{data::inactive_member::InactiveMemberRepository, error::AppError};
use chrono::{Duration, Utc};
use test_utils::{
    builder::TestBuilder,
    factory::{self, inactive_member::InactiveMemberFactory},
};

mod activity;
mod get_inactive_since;
mod register_many;
