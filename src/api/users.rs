//! User management endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::loan_history::UserLoanHistories,
    models::user::{CreateUser, UpdateUserName, User},
};

/// Query for deleting a user by name
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DeleteUserQuery {
    pub name: String,
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<crate::AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list_users().await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Blank name or negative age")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let created = state.services.users.register_user(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename an existing user
#[utoipa::path(
    put,
    path = "/users",
    tag = "users",
    request_body = UpdateUserName,
    responses(
        (status = 200, description = "User renamed", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_name(
    State(state): State<crate::AppState>,
    Json(request): Json<UpdateUserName>,
) -> AppResult<Json<User>> {
    let updated = state.services.users.update_user_name(request).await?;
    Ok(Json(updated))
}

/// Delete a user by name
#[utoipa::path(
    delete,
    path = "/users",
    tag = "users",
    params(DeleteUserQuery),
    responses(
        (status = 204, description = "User deleted, loan history rows cascade"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Query(query): Query<DeleteUserQuery>,
) -> AppResult<StatusCode> {
    state.services.users.delete_user(&query.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get every user with their full loan history
#[utoipa::path(
    get,
    path = "/users/loan-histories",
    tag = "users",
    responses(
        (status = 200, description = "Per-user loan histories", body = Vec<UserLoanHistories>)
    )
)]
pub async fn get_user_loan_histories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<UserLoanHistories>>> {
    let histories = state.services.users.get_user_loan_histories().await?;
    Ok(Json(histories))
}
