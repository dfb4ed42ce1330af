//! Business logic services.
//!
//! Services are stateless: all state lives in the backing store. Each
//! service borrows the process-wide pool and executes every operation within
//! one logical transaction against it.

pub mod customers;
pub mod orders;

pub use customers::CustomerService;
pub use orders::{CreateOrder, ListOrders, OrderLine, OrderService, TodayStats};
