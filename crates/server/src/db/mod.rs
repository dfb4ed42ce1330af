//! Database operations for the orders `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `categories` - Menu categories
//! - `menu_items` - Purchasable items with price and availability flags
//! - `customers` - Customer directory, keyed by UUID, unique phone/email
//! - `orders` - Orders with a denormalized customer contact snapshot
//! - `order_items` - Line items owned by their order
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p restaurant-orders-cli -- migrate
//! ```

pub mod customers;
pub mod menu_items;
pub mod orders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use customers::CustomerRepository;
pub use menu_items::MenuItemRepository;
pub use orders::{OrderRepository, OrderSortField};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g. unique phone).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Wrap a sqlx error, turning unique-constraint violations into
    /// [`RepositoryError::Conflict`]. The message is chosen from the name of
    /// the violated constraint, so callers can report which key collided.
    fn from_write_error(
        err: sqlx::Error,
        conflict_message: fn(Option<&str>) -> &'static str,
    ) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict(conflict_message(db.constraint()).to_owned())
            }
            _ => Self::Database(err),
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
