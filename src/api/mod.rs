//! API handlers for Bibliotek REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod users;
