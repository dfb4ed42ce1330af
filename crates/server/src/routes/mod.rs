//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings the database)
//!
//! # Orders
//! POST /orders                  - Create an order
//! GET  /orders                  - Paged order listing (?page&size&sortBy&sortDir&status)
//! GET  /orders/stats/today      - Today's statistics
//! GET  /orders/{id}             - Order with items
//! GET  /orders/{id}/status      - Order status string
//! PUT  /orders/{id}/status      - Update order status
//!
//! # Customers
//! GET    /customers             - List customers
//! POST   /customers             - Create customer
//! GET    /customers/{id}        - Customer by ID
//! PUT    /customers/{id}        - Update customer
//! DELETE /customers/{id}        - Delete customer
//! GET    /customers/phone/{phone} - Customer by phone
//!
//! # Menu
//! GET  /menu                    - Available menu items
//! GET  /menu/featured           - Featured menu items
//! GET  /menu/categories         - Active categories
//! GET  /menu/categories/{id}    - Available items in a category
//! ```

pub mod customers;
pub mod menu;
pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Build the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(orders::router())
        .merge(customers::router())
        .merge(menu::router())
}
