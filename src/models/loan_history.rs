//! Loan history model and related types
//!
//! A `LoanHistory` row records one loan event for one user and one book
//! name. It is created in `Loaned` status and transitions exactly once,
//! to `Returned`. The ledger keeps the book name as a plain string rather
//! than a reference into the catalog, so a book can be re-registered or
//! renamed without rewriting history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Lifecycle status of a loan row (matching the `loan_status` database enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "loan_status", rename_all = "UPPERCASE")]
pub enum LoanStatus {
    Loaned,
    Returned,
}

/// Loan history model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanHistory {
    pub id: i32,
    /// Owning user; rows are deleted together with the user
    pub user_id: i32,
    /// Denormalized book name, not a foreign key into the catalog
    pub book_name: String,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

impl LoanHistory {
    /// Whether this loan has been returned
    pub fn is_return(&self) -> bool {
        self.status == LoanStatus::Returned
    }

    /// Transition this row to `Returned`. Terminal; the guard against
    /// returning a book that is not on loan lives in the service layer.
    pub fn do_return(&mut self) {
        self.status = LoanStatus::Returned;
    }
}

/// One book entry in a user's loan history view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookHistory {
    pub name: String,
    pub is_return: bool,
}

/// Per-user loan history view. Users with no loans appear with an
/// empty `books` list, never omitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserLoanHistories {
    pub name: String,
    pub books: Vec<BookHistory>,
}
