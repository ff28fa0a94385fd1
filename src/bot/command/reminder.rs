use chrono::Utc;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateInteractionResponseMessage,
};

use super::{invoker_roles, require_bot_user, respond, respond_text};
use crate::{
    error::AppError,
    model::reminder::{CreateReminderParam, Reminder},
    service::{permission::PermissionService, reminder::ReminderService},
    state::BotState,
    util::{
        options::{get_integer, get_str},
        time::{format_local, parse_local_datetime},
    },
};

const LIST_COLOR: u32 = 0x1abc9c;
const MAX_LISTED: usize = 25;

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("remind")
            .description("Post a message at a given time, optionally repeating")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "content", "Message to post")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "at",
                    "First time, as YYYY-MM-DD HH:MM local time",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "every_minutes",
                    "Repeat interval in minutes",
                )
                .min_int_value(1),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "repeat",
                    "Number of runs, 0 for forever",
                )
                .min_int_value(0),
            ),
        CreateCommand::new("list_reminder").description("List the reminders of this server"),
        CreateCommand::new("remove_reminder")
            .description("Delete a reminder")
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "id", "Reminder id")
                    .required(true),
            ),
    ]
}

pub async fn remind(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_user(state, command).await?;

    let options = command.data.options();
    let (Some(content), Some(at)) = (get_str(&options, "content"), get_str(&options, "at")) else {
        return Err(AppError::BadRequest("Content and time are required".to_string()));
    };

    let timezone = &state.config.timezone;
    let first_run_at = parse_local_datetime(at, timezone).ok_or_else(|| {
        AppError::BadRequest("Give the time as YYYY-MM-DD HH:MM".to_string())
    })?;

    let (interval_minutes, repeat) = CreateReminderParam::schedule_from_options(
        get_integer(&options, "every_minutes"),
        get_integer(&options, "repeat"),
    )
    .map_err(AppError::BadRequest)?;

    let reminder = ReminderService::new(&state.db)
        .create(
            CreateReminderParam {
                guild_id,
                channel_id: command.channel_id.get(),
                author_id: command.user.id.get(),
                content: content.to_string(),
                first_run_at,
                interval_minutes,
                repeat,
            },
            Utc::now(),
        )
        .await?;

    respond_text(
        ctx,
        command,
        format!(
            "Reminder #{} set for {} ({})",
            reminder.id,
            format_local(reminder.next_run_at, timezone),
            describe_schedule(&reminder)
        ),
    )
    .await
}

pub async fn list(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_user(state, command).await?;
    let reminders = ReminderService::new(&state.db).list(guild_id).await?;

    if reminders.is_empty() {
        return respond_text(ctx, command, "No reminder is scheduled").await;
    }

    let mut embed = CreateEmbed::new().title("Reminders").color(LIST_COLOR);
    for reminder in reminders.iter().take(MAX_LISTED) {
        embed = embed.field(
            format!(
                "#{} at {}",
                reminder.id,
                format_local(reminder.next_run_at, &state.config.timezone)
            ),
            format!("{}\n{}", describe_schedule(reminder), reminder.content),
            false,
        );
    }

    respond(ctx, command, CreateInteractionResponseMessage::new().embed(embed)).await
}

pub async fn remove(state: &BotState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_bot_user(state, command).await?;

    let options = command.data.options();
    let id = get_integer(&options, "id")
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| AppError::BadRequest("Give a reminder id".to_string()))?;

    let is_manager = PermissionService::new(&state.db)
        .is_bot_manager(Some(guild_id), &invoker_roles(command))
        .await?;

    let removed = ReminderService::new(&state.db)
        .remove(guild_id, id, command.user.id.get(), is_manager)
        .await?;

    respond_text(ctx, command, format!("Removed reminder #{}", removed.id)).await
}

fn describe_schedule(reminder: &Reminder) -> String {
    match (reminder.interval_minutes, reminder.remaining) {
        (None, _) => "once".to_string(),
        (Some(every), None) => format!("every {} minutes, forever", every),
        (Some(every), Some(remaining)) => {
            format!("every {} minutes, {} runs left", every, remaining)
        }
    }
}
