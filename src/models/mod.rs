//! Data models for Bibliotek

pub mod book;
pub mod loan_history;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookStat, BookType, CreateBook};
pub use loan_history::{BookHistory, LoanHistory, LoanStatus, UserLoanHistories};
pub use user::{CreateUser, UpdateUserName, User};
