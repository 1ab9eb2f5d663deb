//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::User,
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Register a new user
    pub async fn create(&self, name: &str, age: Option<i32>) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, age)
            VALUES ($1, $2)
            RETURNING id, name, age, created_at
            "#,
        )
        .bind(name)
        .bind(age)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get all users
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Get user by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by name. Names are not unique; ties resolve to the
    /// oldest registration.
    pub async fn find_by_name(&self, name: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE name = $1 ORDER BY id LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", name)))
    }

    /// Rename a user
    pub async fn update_name(&self, id: i32, name: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET name = $1
            WHERE id = $2
            RETURNING id, name, age, created_at
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Delete a user by name. Loan history rows cascade with the user
    /// (FK `ON DELETE CASCADE`), so no ledger orphans remain.
    pub async fn delete_by_name(&self, name: &str) -> AppResult<()> {
        let deleted = sqlx::query_scalar::<_, i32>(
            r#"
            DELETE FROM users
            WHERE id = (SELECT id FROM users WHERE name = $1 ORDER BY id LIMIT 1)
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("User '{}' not found", name))),
        }
    }
}
