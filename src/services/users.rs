//! User registry service

use std::collections::HashMap;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::loan_history::{BookHistory, LoanHistory, UserLoanHistories},
    models::user::{CreateUser, UpdateUserName, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new user
    pub async fn register_user(&self, request: CreateUser) -> AppResult<User> {
        request.validate()?;

        if request.name.trim().is_empty() {
            return Err(AppError::Validation(
                "User name must not be blank".to_string(),
            ));
        }

        self.repository
            .users
            .create(&request.name, request.age)
            .await
    }

    /// Get all users
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.find_all().await
    }

    /// Rename a user by ID
    pub async fn update_user_name(&self, request: UpdateUserName) -> AppResult<User> {
        request.validate()?;

        self.repository
            .users
            .update_name(request.id, &request.name)
            .await
    }

    /// Delete a user by name, cascading to their loan history rows
    pub async fn delete_user(&self, name: &str) -> AppResult<()> {
        self.repository.users.delete_by_name(name).await
    }

    /// Get every user with their full loan history
    pub async fn get_user_loan_histories(&self) -> AppResult<Vec<UserLoanHistories>> {
        let users = self.repository.users.find_all().await?;
        let histories = self.repository.loan_histories.find_all().await?;
        Ok(join_loan_histories(users, histories))
    }
}

/// Join the user registry against the loan ledger, grouped by user.
/// Every user appears in the result, with an empty book list when they
/// have no history rows.
fn join_loan_histories(
    users: Vec<User>,
    histories: Vec<LoanHistory>,
) -> Vec<UserLoanHistories> {
    let mut by_user: HashMap<i32, Vec<BookHistory>> = HashMap::new();
    for history in histories {
        let is_return = history.is_return();
        by_user.entry(history.user_id).or_default().push(BookHistory {
            name: history.book_name,
            is_return,
        });
    }

    users
        .into_iter()
        .map(|user| UserLoanHistories {
            books: by_user.remove(&user.id).unwrap_or_default(),
            name: user.name,
        })
        .collect()
}
