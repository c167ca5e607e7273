//! User administration.

use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{PaginatedUsers, User},
    util::pagination::total_pages,
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_user(&self, user_id: i32) -> Result<Option<User>, AppError> {
        Ok(UserRepository::new(self.db).find_by_id(user_id).await?)
    }

    /// Lists every account ordered by name.
    pub async fn get_all_users(&self, page: u64, per_page: u64) -> Result<PaginatedUsers, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_all_paginated(page, per_page)
            .await?;

        Ok(PaginatedUsers {
            users,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Changes a user's role.
    ///
    /// # Arguments
    /// - `acting_user_id` - Admin performing the change
    /// - `user_id` - Account being changed
    /// - `role` - New role
    ///
    /// # Returns
    /// - `Ok(User)` - Updated account
    /// - `Err(AppError::BadRequest)` - Admin tried to demote themself
    /// - `Err(AppError::NotFound)` - No such user
    pub async fn set_role(
        &self,
        acting_user_id: i32,
        user_id: i32,
        role: UserRole,
    ) -> Result<User, AppError> {
        if acting_user_id == user_id && role != UserRole::Admin {
            return Err(AppError::BadRequest(
                "You cannot remove your own admin role".to_string(),
            ));
        }

        let user = UserRepository::new(self.db)
            .set_role(user_id, role)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!(
            "User {} set role of user {} to {:?}",
            acting_user_id,
            user_id,
            role
        );

        Ok(user)
    }
}
