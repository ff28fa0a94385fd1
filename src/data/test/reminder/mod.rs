use crate::{
    data::reminder::ReminderRepository, error::AppError, model::reminder::CreateReminderParam,
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory::reminder::ReminderFactory};

mod create;
mod get_due;
mod reschedule;
