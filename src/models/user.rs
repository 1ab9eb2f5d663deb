//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    /// Optional; never negative when present
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "User name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "Age must not be negative"))]
    pub age: Option<i32>,
}

/// Rename user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserName {
    pub id: i32,
    #[validate(length(min = 1, message = "User name must not be empty"))]
    pub name: String,
}
