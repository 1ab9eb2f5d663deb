//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book categories (matching the `book_type` database enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "book_type", rename_all = "UPPERCASE")]
pub enum BookType {
    Computer,
    Economy,
    Society,
    Language,
    Science,
}

/// Book model from database
///
/// Books are immutable once registered; the catalog never updates or
/// deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub book_type: BookType,
    pub created_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Book name must not be empty"))]
    pub name: String,
    pub book_type: BookType,
}

/// Number of catalogued books for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookStat {
    pub book_type: BookType,
    pub count: i64,
}
