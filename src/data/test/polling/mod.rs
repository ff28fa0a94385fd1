use crate::{data::polling::PollingRepository, error::AppError, model::polling::CreatePollingParam};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory::polling::PollingFactory};

mod create;
mod delete_created_before;
