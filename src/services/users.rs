//! Borrower management service

use crate::{
    error::{AppError, AppResult},
    models::User,
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All users, ordered by name
    pub async fn get_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Get user by ID
    pub async fn get_user_by_id(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn find_by_full_name(&self, full_name: &str) -> AppResult<Option<User>> {
        self.repository.users.find_by_full_name(full_name.trim()).await
    }

    /// Register a new user; full names are unique ignoring case
    pub async fn create(&self, user: User) -> AppResult<User> {
        if self.find_by_full_name(&user.full_name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "User '{}' already exists",
                user.full_name
            )));
        }

        let created = self.repository.users.create(&user).await?;
        tracing::info!("Users: created user id={}", created.id);
        Ok(created)
    }
}
