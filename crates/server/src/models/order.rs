//! Order aggregate models.

use chrono::{DateTime, Utc};
use restaurant_orders_core::{Email, MenuItemId, OrderId, OrderItemId, OrderStatus, Phone};
use rust_decimal::Decimal;

/// An order together with its owned line items.
///
/// Customer contact fields are a snapshot captured at order time, not a live
/// reference to the customer directory. `total_amount` equals the sum of the
/// item subtotals at all times after creation.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: Phone,
    pub customer_email: Option<Email>,
    pub customer_address: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Line items in input order. Empty only when loaded from a listing
    /// query that does not join items.
    pub items: Vec<OrderItem>,
}

/// A line item within an order.
///
/// `menu_item_name` and `price_at_time` are snapshots from the menu item at
/// order creation; `subtotal == price_at_time * quantity` exactly.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    /// Weak reference for traceability only; `None` once the menu item is
    /// deleted.
    pub menu_item_id: Option<MenuItemId>,
    pub menu_item_name: String,
    pub quantity: i32,
    pub price_at_time: Decimal,
    pub subtotal: Decimal,
}

/// Fields for a new order, before identities are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: Phone,
    pub customer_email: Option<Email>,
    pub customer_address: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub notes: Option<String>,
}

/// Fields for a new line item, snapshotted from a resolved menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub menu_item_id: MenuItemId,
    pub menu_item_name: String,
    pub quantity: i32,
    pub price_at_time: Decimal,
    pub subtotal: Decimal,
}
