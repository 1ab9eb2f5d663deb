//! Loan histories repository for database operations
//!
//! The mutating operations here are the transactional core of the loan
//! lifecycle. Invariant: at most one row per book name may be in LOANED
//! status at any time. The check-then-insert in [`create_loan`] runs in
//! a single transaction with row locks, and a partial unique index on
//! `(book_name) WHERE status = 'LOANED'` backs the same invariant at the
//! store level.
//!
//! [`create_loan`]: LoanHistoriesRepository::create_loan

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::loan_history::LoanHistory,
};

#[derive(Clone)]
pub struct LoanHistoriesRepository {
    pool: Pool<Postgres>,
}

impl LoanHistoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Issue a loan for a book name to a user.
    ///
    /// Fails with a conflict if any user currently holds the book. On any
    /// failure the transaction rolls back and the ledger is unchanged.
    pub async fn create_loan(&self, user_id: i32, book_name: &str) -> AppResult<LoanHistory> {
        let mut tx = self.pool.begin().await?;

        // Lock any active row for this book name before deciding
        let active: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT id FROM user_loan_histories
            WHERE book_name = $1 AND status = 'LOANED'
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(book_name)
        .fetch_optional(&mut *tx)
        .await?;

        if active.is_some() {
            return Err(AppError::Conflict("book already on loan".to_string()));
        }

        let history = sqlx::query_as::<_, LoanHistory>(
            r#"
            INSERT INTO user_loan_histories (user_id, book_name, status)
            VALUES ($1, $2, 'LOANED')
            RETURNING id, user_id, book_name, status, created_at
            "#,
        )
        .bind(user_id)
        .bind(book_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            // Two concurrent loans can both see an empty ledger; the
            // partial unique index catches the loser
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("book already on loan".to_string())
            }
            _ => AppError::Database(e),
        })?;

        tx.commit().await?;

        Ok(history)
    }

    /// Resolve a return against this user's active loan for the book.
    ///
    /// If more than one LOANED row exists for the pair (which the loan
    /// guard should prevent), the oldest row wins.
    pub async fn return_loan(&self, user_id: i32, book_name: &str) -> AppResult<LoanHistory> {
        let mut tx = self.pool.begin().await?;

        let history: Option<LoanHistory> = sqlx::query_as(
            r#"
            SELECT id, user_id, book_name, status, created_at
            FROM user_loan_histories
            WHERE user_id = $1 AND book_name = $2 AND status = 'LOANED'
            ORDER BY id
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(book_name)
        .fetch_optional(&mut *tx)
        .await?;

        let mut history = history.ok_or_else(|| {
            AppError::NotFound(format!("No active loan of '{}' for this user", book_name))
        })?;

        history.do_return();

        sqlx::query("UPDATE user_loan_histories SET status = $1 WHERE id = $2")
            .bind(history.status)
            .bind(history.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(history)
    }

    /// Count books currently on loan across all users
    pub async fn count_loaned(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_loan_histories WHERE status = 'LOANED'")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Get the full ledger, oldest rows first
    pub async fn find_all(&self) -> AppResult<Vec<LoanHistory>> {
        let histories =
            sqlx::query_as::<_, LoanHistory>("SELECT * FROM user_loan_histories ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(histories)
    }
}
