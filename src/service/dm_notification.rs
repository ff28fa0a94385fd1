use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    data::dm_notification_role::DmNotificationRoleRepository,
    error::AppError,
    model::dm_notification_role::{is_eligible_role, DmNotificationRole, MAX_TOGGLE_ROLES},
};

/// A guild role as seen when building the toggle panel.
#[derive(Debug, Clone)]
pub struct GuildRoleSummary {
    pub role_id: u64,
    pub name: String,
    pub member_count: usize,
    pub is_everyone: bool,
}

pub struct DmNotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DmNotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Picks the roles shown as toggles and returns each with its current state.
    ///
    /// Roles seen for the first time are registered with DMs disabled.
    pub async fn toggle_panel(
        &self,
        guild_id: u64,
        roles: Vec<GuildRoleSummary>,
    ) -> Result<Vec<(GuildRoleSummary, DmNotificationRole)>, AppError> {
        let repo = DmNotificationRoleRepository::new(self.db);
        let mut panel = Vec::new();

        for role in roles
            .into_iter()
            .filter(|r| is_eligible_role(&r.name, r.member_count, r.is_everyone))
            .take(MAX_TOGGLE_ROLES)
        {
            let state = repo.get_or_register(guild_id, role.role_id).await?;
            panel.push((role, state));
        }

        Ok(panel)
    }

    /// Flips the DM flag of a role and returns the new state.
    pub async fn toggle(&self, guild_id: u64, role_id: u64) -> Result<DmNotificationRole, AppError> {
        let repo = DmNotificationRoleRepository::new(self.db);
        let current = repo.get_or_register(guild_id, role_id).await?;
        let updated = repo.set_enabled(guild_id, role_id, !current.enable_dm).await?;

        tracing::info!(
            "DM notification for role {} in guild {} is now {}",
            role_id,
            guild_id,
            if updated.enable_dm { "on" } else { "off" }
        );

        Ok(updated)
    }

    /// Of `candidate_ids`, the role ids whose members should get a DM.
    pub async fn enabled_targets(
        &self,
        guild_id: u64,
        candidate_ids: &[u64],
    ) -> Result<Vec<u64>, AppError> {
        let enabled = DmNotificationRoleRepository::new(self.db)
            .get_enabled_role_ids(guild_id)
            .await?;

        Ok(candidate_ids
            .iter()
            .copied()
            .filter(|id| enabled.contains(id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    fn role(role_id: u64, name: &str, member_count: usize) -> GuildRoleSummary {
        GuildRoleSummary {
            role_id,
            name: name.to_string(),
            member_count,
            is_everyone: false,
        }
    }

    #[tokio::test]
    async fn panel_skips_ineligible_roles_and_registers_disabled() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::DmNotificationRole)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = DmNotificationService::new(db);
        let panel = service
            .toggle_panel(
                1,
                vec![
                    role(10, "editors", 3),
                    role(11, "Music Bot", 1),
                    role(12, "everyone-ish", 100),
                ],
            )
            .await?;

        assert_eq!(panel.len(), 1);
        assert_eq!(panel[0].0.role_id, 10);
        assert!(!panel[0].1.enable_dm);

        Ok(())
    }

    #[tokio::test]
    async fn panel_is_capped() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::DmNotificationRole)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let roles = (0..15).map(|i| role(100 + i, "team", 2)).collect();
        let panel = DmNotificationService::new(db).toggle_panel(1, roles).await?;

        assert_eq!(panel.len(), MAX_TOGGLE_ROLES);

        Ok(())
    }

    #[tokio::test]
    async fn toggle_flips_and_filters_targets() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::DmNotificationRole)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        factory::create_dm_notification_role(db, "1", "10", false).await?;

        let service = DmNotificationService::new(db);
        assert!(service.toggle(1, 10).await?.enable_dm);
        assert_eq!(service.enabled_targets(1, &[10, 11]).await?, vec![10]);

        assert!(!service.toggle(1, 10).await?.enable_dm);
        assert!(service.enabled_targets(1, &[10, 11]).await?.is_empty());

        Ok(())
    }
}
