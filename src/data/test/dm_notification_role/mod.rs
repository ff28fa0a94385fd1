use crate::{data::dm_notification_role::DmNotificationRoleRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

mod get_enabled_role_ids;
mod set_enabled;
