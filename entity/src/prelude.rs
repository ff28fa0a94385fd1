pub use super::dm_notification_role::Entity as DmNotificationRole;
pub use super::guild_setting::Entity as GuildSetting;
pub use super::inactive_member::Entity as InactiveMember;
pub use super::polling::Entity as Polling;
pub use super::reaction_aggregation::Entity as ReactionAggregation;
pub use super::reminder::Entity as Reminder;
pub use super::role_reaction::Entity as RoleReaction;
pub use super::tweet_queue::Entity as TweetQueue;
