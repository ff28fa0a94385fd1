use dioxus_logger::tracing;
use serenity::all::{
    ActionRowComponent, ButtonKind, ComponentInteraction, Context, CreateActionRow,
    CreateButton, CreateInteractionResponse, CreateInteractionResponseMessage, Interaction,
};

use crate::{
    bot::command::{self, dm_notification::toggle_button},
    error::AppError,
    model::dm_notification_role::parse_dm_toggle_custom_id,
    service::dm_notification::DmNotificationService,
    state::BotState,
};

pub async fn handle_interaction(state: &BotState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => command::dispatch(state, &ctx, &command).await,
        Interaction::Component(component) => {
            if let Err(e) = handle_component(state, &ctx, &component).await {
                tracing::error!(
                    "Failed to handle component {}: {}",
                    component.data.custom_id,
                    e
                );
            }
        }
        _ => {}
    }
}

/// Handles a click on a DM notification toggle and redraws the clicked button.
async fn handle_component(
    state: &BotState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let Some((guild_id, role_id)) = parse_dm_toggle_custom_id(&component.data.custom_id) else {
        return Ok(());
    };
    if component.guild_id.map(|id| id.get()) != Some(guild_id) {
        return Ok(());
    }

    let updated = DmNotificationService::new(&state.db)
        .toggle(guild_id, role_id)
        .await?;

    // Rebuild the panel with only the clicked button changed.
    let rows = component
        .message
        .components
        .iter()
        .map(|row| {
            let buttons = row
                .components
                .iter()
                .filter_map(|c| match c {
                    ActionRowComponent::Button(button) => Some(button),
                    _ => None,
                })
                .filter_map(|button| {
                    let ButtonKind::NonLink { custom_id, style } = &button.data else {
                        return None;
                    };
                    let label = button.label.clone().unwrap_or_default();

                    Some(if *custom_id == component.data.custom_id {
                        toggle_button(guild_id, role_id, &label, updated.enable_dm)
                    } else {
                        CreateButton::new(custom_id.clone())
                            .label(label)
                            .style(*style)
                    })
                })
                .collect();

            CreateActionRow::Buttons(buttons)
        })
        .collect();

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new().components(rows),
            ),
        )
        .await?;

    Ok(())
}
