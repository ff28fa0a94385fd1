mod dm_notification_role;
mod guild_setting;
mod inactive_member;
mod polling;
mod reaction_aggregation;
mod reminder;
mod role_reaction;
mod tweet_queue;
