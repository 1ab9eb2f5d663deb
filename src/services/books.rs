//! Book catalog and loan lifecycle service

use std::collections::HashMap;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookStat, CreateBook},
    models::loan_history::LoanHistory,
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new book in the catalog
    pub async fn register_book(&self, request: CreateBook) -> AppResult<Book> {
        request.validate()?;

        // Whitespace-only names pass the length check but are still blank
        if request.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Book name must not be blank".to_string(),
            ));
        }

        self.repository
            .books
            .create(&request.name, request.book_type)
            .await
    }

    /// Loan a book to a user, identified by name.
    ///
    /// Fails with not-found if the user does not exist and with a
    /// conflict if the book is already on loan to anyone.
    pub async fn loan_book(&self, user_name: &str, book_name: &str) -> AppResult<LoanHistory> {
        let user = self.repository.users.find_by_name(user_name).await?;
        self.repository
            .loan_histories
            .create_loan(user.id, book_name)
            .await
    }

    /// Return a book loaned to a user.
    ///
    /// Fails with not-found if the user does not exist or holds no
    /// active loan for the book.
    pub async fn return_book(&self, user_name: &str, book_name: &str) -> AppResult<LoanHistory> {
        let user = self.repository.users.find_by_name(user_name).await?;
        self.repository
            .loan_histories
            .return_loan(user.id, book_name)
            .await
    }

    /// Count books currently on loan
    pub async fn count_loaned_books(&self) -> AppResult<i64> {
        self.repository.loan_histories.count_loaned().await
    }

    /// Get the number of catalogued books per category
    pub async fn get_book_statistics(&self) -> AppResult<Vec<BookStat>> {
        let books = self.repository.books.find_all().await?;
        Ok(aggregate_by_type(&books))
    }
}

/// Group the catalog by category. One entry per category present;
/// entry order is unspecified.
fn aggregate_by_type(books: &[Book]) -> Vec<BookStat> {
    let mut counts: HashMap<_, i64> = HashMap::new();
    for book in books {
        *counts.entry(book.book_type).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(book_type, count)| BookStat { book_type, count })
        .collect()
}
