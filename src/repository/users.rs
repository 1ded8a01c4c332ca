//! Users repository for PostgreSQL

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::UsersRepository;
use crate::{
    error::{AppError, AppResult},
    models::User,
};

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgUsersRepository {
    pool: Pool<Postgres>,
}

impl PgUsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn get_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT id, full_name, year_of_birth FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::UserNotFound(format!("User with id {} not found", id)))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, full_name, year_of_birth FROM users ORDER BY full_name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_full_name(&self, full_name: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, full_name, year_of_birth FROM users WHERE LOWER(full_name) = LOWER($1)",
        )
        .bind(full_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, year_of_birth)
            VALUES ($1, $2)
            RETURNING id, full_name, year_of_birth
            "#,
        )
        .bind(&user.full_name)
        .bind(user.year_of_birth)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .and_then(|d| d.code())
                .is_some_and(|code| code == UNIQUE_VIOLATION);
            if duplicate {
                AppError::Conflict(format!("User '{}' already exists", user.full_name))
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(created)
    }
}
