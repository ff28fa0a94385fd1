use crate::{
    data::role_reaction::RoleReactionRepository, error::AppError,
    model::role_reaction::CreateRoleReactionParam,
};
use test_utils::{builder::TestBuilder, factory};

mod find_by_message_id;
