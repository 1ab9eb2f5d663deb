//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookType},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Register a new book in the catalog
    pub async fn create(&self, name: &str, book_type: BookType) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (name, book_type)
            VALUES ($1, $2)
            RETURNING id, name, book_type, created_at
            "#,
        )
        .bind(name)
        .bind(book_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    /// Get all catalogued books
    pub async fn find_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }
}
