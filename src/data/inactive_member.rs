//! Watched member data repository for inactivity detection.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::inactive_member::InactiveMember;

use entity::inactive_member::Column;

/// Repository providing database operations for watched members.
pub struct InactiveMemberRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InactiveMemberRepository<'a> {
    /// Creates a new InactiveMemberRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `InactiveMemberRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers members for watching, leaving already registered members untouched.
    ///
    /// New members start with both activity timestamps at `now` and `notified` cleared.
    ///
    /// # Arguments
    /// - `user_ids` - Members to watch
    /// - `now` - Initial activity time
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of newly registered members
    /// - `Err(DbErr)` - Database error during insert
    pub async fn register_many(&self, user_ids: &[u64], now: DateTime<Utc>) -> Result<u64, DbErr> {
        let mut registered = 0;

        for user_id in user_ids {
            registered += entity::prelude::InactiveMember::insert(
                entity::inactive_member::ActiveModel {
                    user_id: ActiveValue::Set(user_id.to_string()),
                    last_posted: ActiveValue::Set(now),
                    last_react: ActiveValue::Set(now),
                    notified: ActiveValue::Set(false),
                },
            )
            .on_conflict(OnConflict::column(Column::UserId).do_nothing().to_owned())
            .exec_without_returning(self.db)
            .await?;
        }

        Ok(registered)
    }

    pub async fn find_by_user_id(&self, user_id: u64) -> Result<Option<InactiveMember>, DbErr> {
        let entity = entity::prelude::InactiveMember::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        entity.map(InactiveMember::from_entity).transpose()
    }

    /// Stops watching a member, returning whether they were registered.
    pub async fn delete(&self, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::InactiveMember::delete_by_id(user_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Records a post by a watched member and clears their notified flag.
    ///
    /// # Returns
    /// - `Ok(true)` - The member is watched and was updated
    /// - `Ok(false)` - The member is not watched
    /// - `Err(DbErr)` - Database error during update
    pub async fn touch_posted(&self, user_id: u64, at: DateTime<Utc>) -> Result<bool, DbErr> {
        self.touch(user_id, Column::LastPosted, at).await
    }

    /// Records a reaction by a watched member and clears their notified flag.
    pub async fn touch_react(&self, user_id: u64, at: DateTime<Utc>) -> Result<bool, DbErr> {
        self.touch(user_id, Column::LastReact, at).await
    }

    async fn touch(&self, user_id: u64, column: Column, at: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::InactiveMember::update_many()
            .col_expr(column, Expr::value(at))
            .col_expr(Column::Notified, Expr::value(false))
            .filter(Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Resets both activity timestamps of the given members to `at` and clears `notified`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of watched members updated
    /// - `Err(DbErr)` - Database error during update
    pub async fn activate(&self, user_ids: &[u64], at: DateTime<Utc>) -> Result<u64, DbErr> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<String> = user_ids.iter().map(|id| id.to_string()).collect();
        let result = entity::prelude::InactiveMember::update_many()
            .col_expr(Column::LastPosted, Expr::value(at))
            .col_expr(Column::LastReact, Expr::value(at))
            .col_expr(Column::Notified, Expr::value(false))
            .filter(Column::UserId.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Sets the notified flag of the given members.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of watched members updated
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_notified(&self, user_ids: &[u64], notified: bool) -> Result<u64, DbErr> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<String> = user_ids.iter().map(|id| id.to_string()).collect();
        let result = entity::prelude::InactiveMember::update_many()
            .col_expr(Column::Notified, Expr::value(notified))
            .filter(Column::UserId.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Gets watched members by notified flag.
    pub async fn get_by_notified(&self, notified: bool) -> Result<Vec<InactiveMember>, DbErr> {
        entity::prelude::InactiveMember::find()
            .filter(Column::Notified.eq(notified))
            .order_by_asc(Column::UserId)
            .all(self.db)
            .await?
            .into_iter()
            .map(InactiveMember::from_entity)
            .collect()
    }

    /// Gets members not yet notified whose last post and last reaction are before `cutoff`.
    pub async fn get_inactive_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<InactiveMember>, DbErr> {
        entity::prelude::InactiveMember::find()
            .filter(Column::Notified.eq(false))
            .filter(Column::LastPosted.lt(cutoff))
            .filter(Column::LastReact.lt(cutoff))
            .all(self.db)
            .await?
            .into_iter()
            .map(InactiveMember::from_entity)
            .collect()
    }
}
