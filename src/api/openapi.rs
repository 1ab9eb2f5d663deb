//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bibliotek API",
        version = "0.1.0",
        description = "Library Management System REST API",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::create_book,
        books::loan_book,
        books::return_book,
        books::count_loaned_books,
        books::get_book_statistics,
        // Users
        users::list_users,
        users::create_user,
        users::update_user_name,
        users::delete_user,
        users::get_user_loan_histories,
    ),
    components(
        schemas(
            // Health
            health::HealthResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookType,
            crate::models::book::CreateBook,
            crate::models::book::BookStat,
            books::BookLoanRequest,
            books::LoanResponse,
            books::ReturnResponse,
            books::LoanCountResponse,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUserName,
            // Loan histories
            crate::models::loan_history::LoanHistory,
            crate::models::loan_history::LoanStatus,
            crate::models::loan_history::BookHistory,
            crate::models::loan_history::UserLoanHistories,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "books", description = "Book catalog and loan lifecycle"),
        (name = "users", description = "User registry")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router serving the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
