//! Book catalog and loan endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, BookStat, CreateBook},
    models::loan_history::LoanHistory,
};

/// Loan or return request, identifying both sides by name
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookLoanRequest {
    pub user_name: String,
    pub book_name: String,
}

/// Loan response
#[derive(Serialize, ToSchema)]
pub struct LoanResponse {
    /// Ledger row ID
    pub id: i32,
    /// Status message
    pub message: String,
}

/// Return response with the resolved ledger row
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    pub status: String,
    pub history: LoanHistory,
}

/// Count of books currently on loan
#[derive(Serialize, ToSchema)]
pub struct LoanCountResponse {
    pub count: i64,
}

/// Register a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book registered", body = Book),
        (status = 400, description = "Blank book name")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.register_book(request).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Loan a book to a user
#[utoipa::path(
    post,
    path = "/books/loan",
    tag = "books",
    request_body = BookLoanRequest,
    responses(
        (status = 201, description = "Book loaned", body = LoanResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Book already on loan")
    )
)]
pub async fn loan_book(
    State(state): State<crate::AppState>,
    Json(request): Json<BookLoanRequest>,
) -> AppResult<(StatusCode, Json<LoanResponse>)> {
    let history = state
        .services
        .books
        .loan_book(&request.user_name, &request.book_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LoanResponse {
            id: history.id,
            message: "Book loaned successfully".to_string(),
        }),
    ))
}

/// Return a loaned book
#[utoipa::path(
    put,
    path = "/books/return",
    tag = "books",
    request_body = BookLoanRequest,
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 404, description = "User or active loan not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Json(request): Json<BookLoanRequest>,
) -> AppResult<Json<ReturnResponse>> {
    let history = state
        .services
        .books
        .return_book(&request.user_name, &request.book_name)
        .await?;

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        history,
    }))
}

/// Count books currently on loan
#[utoipa::path(
    get,
    path = "/books/loan/count",
    tag = "books",
    responses(
        (status = 200, description = "Number of books on loan", body = LoanCountResponse)
    )
)]
pub async fn count_loaned_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<LoanCountResponse>> {
    let count = state.services.books.count_loaned_books().await?;
    Ok(Json(LoanCountResponse { count }))
}

/// Get book counts per category
#[utoipa::path(
    get,
    path = "/books/stats",
    tag = "books",
    responses(
        (status = 200, description = "Books per category", body = Vec<BookStat>)
    )
)]
pub async fn get_book_statistics(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookStat>>> {
    let stats = state.services.books.get_book_statistics().await?;
    Ok(Json(stats))
}
