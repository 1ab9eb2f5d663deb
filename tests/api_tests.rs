//! API integration tests
//!
//! These run against a live server (with its database migrated) started
//! separately, e.g. `cargo run` with a local Postgres.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so tests can be re-run against the same database
fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn create_user(client: &Client, name: &str) {
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": name, "age": null }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}

async fn loan_book(client: &Client, user_name: &str, book_name: &str) -> reqwest::Response {
    client
        .post(format!("{}/books/loan", BASE_URL))
        .json(&json!({ "user_name": user_name, "book_name": book_name }))
        .send()
        .await
        .expect("Failed to send request")
}

async fn return_book(client: &Client, user_name: &str, book_name: &str) -> reqwest::Response {
    client
        .put(format!("{}/books/return", BASE_URL))
        .json(&json!({ "user_name": user_name, "book_name": book_name }))
        .send()
        .await
        .expect("Failed to send request")
}

async fn loan_histories_for(client: &Client, user_name: &str) -> Option<Value> {
    let response = client
        .get(format!("{}/users/loan-histories", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    body.as_array()
        .expect("Expected an array")
        .iter()
        .find(|entry| entry["name"] == user_name)
        .cloned()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_book() {
    let client = Client::new();
    let name = unique("Alice in Wonderland");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "name": name, "book_type": "COMPUTER" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], name.as_str());
    assert_eq!(body["book_type"], "COMPUTER");
    assert!(body["id"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_register_book_blank_name_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "name": "   ", "book_type": "SCIENCE" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_loan_book() {
    let client = Client::new();
    let user = unique("borrower");
    let book = unique("book");
    create_user(&client, &user).await;

    let response = loan_book(&client, &user, &book).await;
    assert_eq!(response.status(), 201);

    let entry = loan_histories_for(&client, &user).await.expect("user missing");
    let books = entry["books"].as_array().expect("Expected an array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], book.as_str());
    assert_eq!(books[0]["is_return"], false);
}

#[tokio::test]
#[ignore]
async fn test_loan_unknown_user_is_404() {
    let client = Client::new();

    let response = loan_book(&client, &unique("nobody"), &unique("book")).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_double_loan_is_conflict() {
    let client = Client::new();
    let first = unique("first");
    let second = unique("second");
    let book = unique("popular-book");
    create_user(&client, &first).await;
    create_user(&client, &second).await;

    let response = loan_book(&client, &first, &book).await;
    assert_eq!(response.status(), 201);

    // Same book, any user: exactly one LOANED row may exist
    let response = loan_book(&client, &second, &book).await;
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "book already on loan");

    let entry = loan_histories_for(&client, &second).await.expect("user missing");
    assert!(entry["books"].as_array().expect("Expected an array").is_empty());
}

#[tokio::test]
#[ignore]
async fn test_return_without_loan_is_404() {
    let client = Client::new();
    let user = unique("returner");
    create_user(&client, &user).await;

    let response = return_book(&client, &user, &unique("never-loaned")).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_book_is_reloanable_after_return() {
    let client = Client::new();
    let user = unique("rereader");
    let book = unique("favorite");
    create_user(&client, &user).await;

    assert_eq!(loan_book(&client, &user, &book).await.status(), 201);
    assert_eq!(return_book(&client, &user, &book).await.status(), 200);
    assert_eq!(loan_book(&client, &user, &book).await.status(), 201);

    // Two ledger rows now: one returned, one active
    let entry = loan_histories_for(&client, &user).await.expect("user missing");
    let books = entry["books"].as_array().expect("Expected an array");
    assert_eq!(books.len(), 2);
    let returned = books.iter().filter(|b| b["is_return"] == true).count();
    assert_eq!(returned, 1);
}

#[tokio::test]
#[ignore]
async fn test_loan_count_tracks_active_loans() {
    let client = Client::new();
    let user = unique("counter");
    create_user(&client, &user).await;

    let before: Value = client
        .get(format!("{}/books/loan/count", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let book_a = unique("count-a");
    let book_b = unique("count-b");
    assert_eq!(loan_book(&client, &user, &book_a).await.status(), 201);
    assert_eq!(loan_book(&client, &user, &book_b).await.status(), 201);
    assert_eq!(return_book(&client, &user, &book_b).await.status(), 200);

    let after: Value = client
        .get(format!("{}/books/loan/count", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    // One loan survived of the two issued
    let delta = after["count"].as_i64().unwrap() - before["count"].as_i64().unwrap();
    assert_eq!(delta, 1);
}

#[tokio::test]
#[ignore]
async fn test_book_statistics_grouped_by_type() {
    let client = Client::new();

    for (name, book_type) in [("stat-a", "COMPUTER"), ("stat-b", "COMPUTER"), ("stat-c", "SCIENCE")] {
        let response = client
            .post(format!("{}/books", BASE_URL))
            .json(&json!({ "name": unique(name), "book_type": book_type }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/books/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let stats = body.as_array().expect("Expected an array");

    // Assert by lookup, not position
    let computer = stats.iter().find(|s| s["book_type"] == "COMPUTER").expect("no COMPUTER entry");
    let science = stats.iter().find(|s| s["book_type"] == "SCIENCE").expect("no SCIENCE entry");
    assert!(computer["count"].as_i64().unwrap() >= 2);
    assert!(science["count"].as_i64().unwrap() >= 1);
}

#[tokio::test]
#[ignore]
async fn test_user_crud() {
    let client = Client::new();
    let name = unique("crud-user");

    // Create
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": name, "age": 20 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse response");
    let id = created["id"].as_i64().expect("No id in response");
    assert_eq!(created["age"], 20);

    // List
    let response = client
        .get(format!("{}/users", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let users: Value = response.json().await.expect("Failed to parse response");
    assert!(users
        .as_array()
        .expect("Expected an array")
        .iter()
        .any(|u| u["id"].as_i64() == Some(id)));

    // Rename
    let renamed = unique("crud-user-renamed");
    let response = client
        .put(format!("{}/users", BASE_URL))
        .json(&json!({ "id": id, "name": renamed }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["name"], renamed.as_str());

    // Delete
    let response = client
        .delete(format!("{}/users?name={}", BASE_URL, renamed))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Deleting again is a 404
    let response = client
        .delete(format!("{}/users?name={}", BASE_URL, renamed))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_negative_age_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": unique("negative"), "age": -1 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_user_without_loans_appears_in_histories() {
    let client = Client::new();
    let user = unique("no-loans");
    create_user(&client, &user).await;

    let entry = loan_histories_for(&client, &user).await.expect("user missing");
    assert!(entry["books"].as_array().expect("Expected an array").is_empty());
}

#[tokio::test]
#[ignore]
async fn test_delete_user_cascades_to_histories() {
    let client = Client::new();
    let user = unique("cascade");
    let book = unique("cascade-book");
    create_user(&client, &user).await;
    assert_eq!(loan_book(&client, &user, &book).await.status(), 201);

    let response = client
        .delete(format!("{}/users?name={}", BASE_URL, user))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Neither the user nor their ledger rows survive the delete
    assert!(loan_histories_for(&client, &user).await.is_none());

    // The book is loanable again since its only LOANED row is gone
    let other = unique("cascade-other");
    create_user(&client, &other).await;
    assert_eq!(loan_book(&client, &other, &book).await.status(), 201);
}
