use crate::{
    data::reaction_aggregation::ReactionAggregationRepository,
    error::AppError,
    model::reaction_aggregation::{CreateReactionAggregationParam, ReactionKind},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory::reaction_aggregation::ReactionAggregationFactory};

mod counters;
mod create;
mod delete;
mod mark_notified;
mod mark_reminded;
mod periodic_queries;
