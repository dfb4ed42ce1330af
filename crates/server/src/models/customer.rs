//! Customer directory models.

use chrono::{DateTime, Utc};
use restaurant_orders_core::{CustomerId, Email, Phone};

/// A customer, keyed by a globally unique opaque UUID.
///
/// Phone and email are unique lookup keys. The customer directory has no
/// link to orders: orders carry their own contact snapshot.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: Phone,
    pub email: Option<Email>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: Phone,
    pub email: Option<Email>,
    pub address: Option<String>,
}

/// Partial update of a customer: `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<String>,
}
