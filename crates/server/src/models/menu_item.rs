//! Menu catalog models.
//!
//! The catalog is read-only from the order path's perspective: once a menu
//! item is referenced by an order, its name and price are copied into the
//! order line, never referenced live.

use chrono::{DateTime, Utc};
use restaurant_orders_core::{CategoryId, MenuItemId};
use rust_decimal::Decimal;

/// A menu category.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub display_order: i32,
    pub is_active: bool,
}

/// A purchasable menu item.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    /// Fixed-point decimal price, two fractional digits.
    pub price: Decimal,
    pub is_available: bool,
    pub is_featured: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}
