//! Order repository.
//!
//! The create path inserts an order and all of its items inside one
//! transaction, so a partially written item set is never visible.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use restaurant_orders_core::{
    Email, MenuItemId, OrderId, OrderItemId, OrderStatus, PageRequest, Phone, SortDirection,
};

use super::RepositoryError;
use crate::models::{NewOrder, NewOrderItem, Order, OrderItem};

const ORDER_COLUMNS: &str = "id, customer_name, customer_phone, customer_email, \
     customer_address, total_amount, status, notes, created_at";

const ORDER_ITEM_COLUMNS: &str =
    "id, order_id, menu_item_id, menu_item_name, quantity, price_at_time, subtotal";

/// Sortable columns for order listings.
///
/// Sorting is interpolated into SQL, so the set of accepted fields is a
/// closed whitelist; anything else is rejected at the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortField {
    CreatedAt,
    TotalAmount,
    Status,
    CustomerName,
}

impl OrderSortField {
    /// Parse an HTTP sort parameter (camelCase or snake_case).
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            "totalAmount" | "total_amount" => Some(Self::TotalAmount),
            "status" => Some(Self::Status),
            "customerName" | "customer_name" => Some(Self::CustomerName),
            _ => None,
        }
    }

    /// Column name this field sorts by.
    #[must_use]
    pub const fn as_column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::TotalAmount => "total_amount",
            Self::Status => "status",
            Self::CustomerName => "customer_name",
        }
    }
}

impl Default for OrderSortField {
    fn default() -> Self {
        Self::CreatedAt
    }
}

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    customer_phone: String,
    customer_email: Option<String>,
    customer_address: String,
    total_amount: Decimal,
    status: OrderStatus,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let customer_phone = Phone::parse(&row.customer_phone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
        })?;

        let customer_email = row
            .customer_email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })?;

        Ok(Self {
            id: OrderId::new(row.id),
            customer_name: row.customer_name,
            customer_phone,
            customer_email,
            customer_address: row.customer_address,
            total_amount: row.total_amount,
            status: row.status,
            notes: row.notes,
            created_at: row.created_at,
            items: Vec::new(),
        })
    }
}

/// Internal row type for order item queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    menu_item_id: Option<i64>,
    menu_item_name: String,
    quantity: i32,
    price_at_time: Decimal,
    subtotal: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            menu_item_id: row.menu_item_id.map(MenuItemId::new),
            menu_item_name: row.menu_item_name,
            quantity: row.quantity,
            price_at_time: row.price_at_time,
            subtotal: row.subtotal,
        }
    }
}

/// Repository for order persistence.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order and all of its items as one unit.
    ///
    /// The whole write happens in a single transaction; on any failure
    /// nothing is persisted. Returns the fully populated order including
    /// generated identities.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create(
        &self,
        new_order: &NewOrder,
        new_items: &[NewOrderItem],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders \
                (customer_name, customer_phone, customer_email, customer_address, \
                 total_amount, status, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(&new_order.customer_name)
        .bind(new_order.customer_phone.as_str())
        .bind(new_order.customer_email.as_ref().map(Email::as_str))
        .bind(&new_order.customer_address)
        .bind(new_order.total_amount)
        .bind(new_order.status)
        .bind(new_order.notes.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        let order_id = order_row.id;
        let mut items = Vec::with_capacity(new_items.len());

        for item in new_items {
            let item_row = sqlx::query_as::<_, OrderItemRow>(&format!(
                "INSERT INTO order_items \
                    (order_id, menu_item_id, menu_item_name, quantity, price_at_time, subtotal) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 RETURNING {ORDER_ITEM_COLUMNS}"
            ))
            .bind(order_id)
            .bind(item.menu_item_id.as_i64())
            .bind(&item.menu_item_name)
            .bind(item.quantity)
            .bind(item.price_at_time)
            .bind(item.subtotal)
            .fetch_one(&mut *tx)
            .await?;

            items.push(item_row.into());
        }

        tx.commit().await?;

        let mut order: Order = order_row.try_into()?;
        order.items = items;
        Ok(order)
    }

    /// Fetch an order together with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if the stored data is invalid.
    pub async fn get_with_items(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items \
             WHERE order_id = $1 ORDER BY id ASC"
        ))
        .bind(id.as_i64())
        .fetch_all(self.pool)
        .await?;

        let mut order: Order = row.try_into()?;
        order.items = item_rows.into_iter().map(Into::into).collect();
        Ok(Some(order))
    }

    /// List one page of orders (without items) plus the total count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if the stored data is invalid.
    pub async fn list(
        &self,
        page: PageRequest,
        sort: OrderSortField,
        direction: SortDirection,
        status: Option<OrderStatus>,
    ) -> Result<(Vec<Order>, u64), RepositoryError> {
        // Sort column and direction come from closed enums, never from the
        // raw request, so interpolation is safe here.
        let order_clause = format!("ORDER BY {} {}", sort.as_column(), direction.as_sql());

        let (total, rows) = if let Some(status) = status {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = $1")
                .bind(status)
                .fetch_one(self.pool)
                .await?;

            let rows = sqlx::query_as::<_, OrderRow>(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders WHERE status = $1 \
                 {order_clause} LIMIT $2 OFFSET $3"
            ))
            .bind(status)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool)
            .await?;

            (total, rows)
        } else {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
                .fetch_one(self.pool)
                .await?;

            let rows = sqlx::query_as::<_, OrderRow>(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders {order_clause} LIMIT $1 OFFSET $2"
            ))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool)
            .await?;

            (total, rows)
        };

        let orders = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((orders, total.try_into().unwrap_or(0)))
    }

    /// Overwrite an order's status, and its notes when provided.
    ///
    /// Returns `false` if no order with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        notes: Option<&str>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE orders SET status = $2, notes = COALESCE($3, notes) WHERE id = $1",
        )
        .bind(id.as_i64())
        .bind(status)
        .bind(notes)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count orders created at or after the given instant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE created_at >= $1")
            .bind(since)
            .fetch_one(self.pool)
            .await?;

        Ok(count.try_into().unwrap_or(0))
    }

    /// Count orders currently in the given status, across all time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(&self, status: OrderStatus) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = $1")
            .bind(status)
            .fetch_one(self.pool)
            .await?;

        Ok(count.try_into().unwrap_or(0))
    }

    /// Sum the totals of non-cancelled orders created at or after the given
    /// instant. Zero when no orders match, never null.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn revenue_since(&self, since: DateTime<Utc>) -> Result<Decimal, RepositoryError> {
        let revenue: Option<Decimal> = sqlx::query_scalar(
            "SELECT SUM(total_amount) FROM orders \
             WHERE created_at >= $1 AND status <> $2",
        )
        .bind(since)
        .bind(OrderStatus::Cancelled)
        .fetch_one(self.pool)
        .await?;

        Ok(revenue.unwrap_or(Decimal::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_accepts_both_parameter_styles() {
        assert_eq!(
            OrderSortField::from_param("createdAt"),
            Some(OrderSortField::CreatedAt)
        );
        assert_eq!(
            OrderSortField::from_param("created_at"),
            Some(OrderSortField::CreatedAt)
        );
        assert_eq!(
            OrderSortField::from_param("totalAmount"),
            Some(OrderSortField::TotalAmount)
        );
        assert_eq!(
            OrderSortField::from_param("customer_name"),
            Some(OrderSortField::CustomerName)
        );
    }

    #[test]
    fn sort_field_rejects_unknown_columns() {
        assert_eq!(OrderSortField::from_param("notes"), None);
        assert_eq!(OrderSortField::from_param("id; DROP TABLE orders"), None);
    }

    #[test]
    fn sort_columns_are_plain_identifiers() {
        for field in [
            OrderSortField::CreatedAt,
            OrderSortField::TotalAmount,
            OrderSortField::Status,
            OrderSortField::CustomerName,
        ] {
            assert!(
                field
                    .as_column()
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b == b'_')
            );
        }
    }
}
