//! Domain models.

pub mod customer;
pub mod menu_item;
pub mod order;

pub use customer::{Customer, NewCustomer, UpdateCustomer};
pub use menu_item::{Category, MenuItem};
pub use order::{NewOrder, NewOrderItem, Order, OrderItem};
