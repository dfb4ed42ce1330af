//! Core types for the restaurant orders backend.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod page;
pub mod phone;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use page::{Page, PageRequest, SortDirection};
pub use phone::{Phone, PhoneError};
pub use status::{OrderStatus, ParseOrderStatusError};
