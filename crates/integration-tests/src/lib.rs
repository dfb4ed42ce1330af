//! Integration tests for the restaurant orders backend.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, then:
//! cargo run -p restaurant-orders-cli -- migrate
//! cargo run -p restaurant-orders-cli -- seed
//! cargo run -p restaurant-orders-server &
//!
//! cargo test -p restaurant-orders-integration-tests -- --ignored
//! ```
//!
//! The tests talk to a running server over HTTP; they are `#[ignore]`d so a
//! plain `cargo test` stays hermetic.

/// Base URL for the server API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SERVER_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client for tests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Connect directly to the database behind the server under test.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the connection fails.
pub async fn db_pool() -> sqlx::PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    sqlx::PgPool::connect(&url)
        .await
        .expect("Failed to connect to database")
}

/// A well-formed order creation body referencing seeded menu items.
#[must_use]
pub fn sample_order_body(menu_item_id: i64, quantity: i32) -> serde_json::Value {
    serde_json::json!({
        "customerName": "Test Customer",
        "customerPhone": "+15559990000",
        "customerEmail": "test@example.com",
        "customerAddress": "1 Test Street",
        "items": [{"menuItemId": menu_item_id, "quantity": quantity}]
    })
}
