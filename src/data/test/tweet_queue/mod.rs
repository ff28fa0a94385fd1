use crate::{data::tweet_queue::TweetQueueRepository, error::AppError, model::tweet::CreateTweetParam};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory::tweet_queue::TweetQueueFactory};

mod create;
mod get_by_guild_paginated;
mod get_created_before;
