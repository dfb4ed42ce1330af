//! Order lifecycle service.
//!
//! Orchestrates order creation (catalog validation, price snapshotting,
//! total computation), status updates, and daily statistics aggregation.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use restaurant_orders_core::{
    Email, MenuItemId, OrderId, OrderStatus, Page, PageRequest, Phone, SortDirection,
};

use crate::db::{MenuItemRepository, OrderRepository, OrderSortField};
use crate::error::AppError;
use crate::models::{MenuItem, NewOrder, NewOrderItem, Order};

/// One requested order line: which menu item, and how many.
#[derive(Debug, Clone, Copy)]
pub struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub quantity: i32,
}

/// Validated input for creating an order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer_name: String,
    pub customer_phone: Phone,
    pub customer_email: Option<Email>,
    pub customer_address: String,
    pub notes: Option<String>,
    /// Requested lines, in input order. Never empty.
    pub lines: Vec<OrderLine>,
}

/// Parameters for a paged order listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOrders {
    pub page: PageRequest,
    pub sort: OrderSortField,
    pub direction: SortDirection,
    pub status: Option<OrderStatus>,
}

/// Daily statistics for the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayStats {
    /// Orders created within the current local calendar day.
    pub today_orders_count: u64,
    /// Orders currently PENDING, across all time.
    pub pending_orders_count: u64,
    /// Sum of today's order totals, excluding cancelled orders. Zero when
    /// nothing matches, never null.
    pub today_revenue: Decimal,
}

/// Service for order operations.
pub struct OrderService<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order from validated input.
    ///
    /// Each requested line is resolved against the catalog in input order;
    /// the item's name and price are snapshotted into the line and the total
    /// accumulated as the exact decimal sum of subtotals. The order and its
    /// items are persisted as one unit.
    ///
    /// # Errors
    ///
    /// - `AppError::Validation` if the line list is empty
    /// - `AppError::NotFound` if a referenced menu item does not exist
    /// - `AppError::Business` if a referenced menu item is unavailable
    /// - `AppError::Database` if persistence fails
    pub async fn create_order(&self, input: CreateOrder) -> Result<Order, AppError> {
        if input.lines.is_empty() {
            let fields = [(
                "items".to_owned(),
                "Order must contain at least one item".to_owned(),
            )];
            return Err(AppError::Validation(fields.into_iter().collect()));
        }

        let catalog = MenuItemRepository::new(self.pool);
        let mut items = Vec::with_capacity(input.lines.len());
        let mut total_amount = Decimal::ZERO;

        for line in &input.lines {
            let menu_item = catalog
                .get_by_id(line.menu_item_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Menu item not found with id: {}",
                        line.menu_item_id
                    ))
                })?;

            let item = snapshot_line(&menu_item, line.quantity)?;
            total_amount += item.subtotal;
            items.push(item);
        }

        let new_order = NewOrder {
            customer_name: input.customer_name,
            customer_phone: input.customer_phone,
            customer_email: input.customer_email,
            customer_address: input.customer_address,
            total_amount,
            status: OrderStatus::Pending,
            notes: input.notes,
        };

        let order = OrderRepository::new(self.pool)
            .create(&new_order, &items)
            .await?;

        tracing::info!(
            order_id = %order.id,
            items = order.items.len(),
            total = %order.total_amount,
            "Order created"
        );

        Ok(order)
    }

    /// Fetch an order together with its items.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no order with the ID exists, or
    /// `AppError::Database` on query failure.
    pub async fn get_order(&self, id: OrderId) -> Result<Order, AppError> {
        OrderRepository::new(self.pool)
            .get_with_items(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order not found with id: {id}")))
    }

    /// List orders page by page, optionally filtered to a single status.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` on query failure.
    pub async fn list_orders(&self, params: ListOrders) -> Result<Page<Order>, AppError> {
        let (orders, total) = OrderRepository::new(self.pool)
            .list(params.page, params.sort, params.direction, params.status)
            .await?;

        Ok(Page::new(orders, params.page, total))
    }

    /// Overwrite an order's status, and its notes when provided.
    ///
    /// Any status may be set from any other; the enumeration implies a
    /// forward pipeline but transitions are deliberately unrestricted.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no order with the ID exists, or
    /// `AppError::Database` on failure.
    pub async fn update_order_status(
        &self,
        id: OrderId,
        new_status: OrderStatus,
        notes: Option<&str>,
    ) -> Result<Order, AppError> {
        let repo = OrderRepository::new(self.pool);
        let updated = repo.update_status(id, new_status, notes).await?;
        if !updated {
            return Err(AppError::NotFound(format!("Order not found with id: {id}")));
        }

        tracing::info!(order_id = %id, status = %new_status, "Order status updated");

        self.get_order(id).await
    }

    /// Aggregate today's statistics.
    ///
    /// "Today" starts at local midnight. The pending count is global, not
    /// restricted to today.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` on query failure.
    pub async fn today_stats(&self) -> Result<TodayStats, AppError> {
        let start_of_day = start_of_day_utc(Local::now().date_naive());
        let repo = OrderRepository::new(self.pool);

        let today_orders_count = repo.count_created_since(start_of_day).await?;
        let pending_orders_count = repo.count_by_status(OrderStatus::Pending).await?;
        let today_revenue = repo.revenue_since(start_of_day).await?;

        Ok(TodayStats {
            today_orders_count,
            pending_orders_count,
            today_revenue,
        })
    }
}

/// Build a line item snapshot from a resolved menu item.
///
/// # Errors
///
/// Returns `AppError::Business` if the item is not available.
fn snapshot_line(menu_item: &MenuItem, quantity: i32) -> Result<NewOrderItem, AppError> {
    if !menu_item.is_available {
        return Err(AppError::Business(format!(
            "Menu item is not available: {}",
            menu_item.name
        )));
    }

    Ok(NewOrderItem {
        menu_item_id: menu_item.id,
        menu_item_name: menu_item.name.clone(),
        quantity,
        price_at_time: menu_item.price,
        subtotal: menu_item.price * Decimal::from(quantity),
    })
}

/// Local midnight of the given date, as a UTC instant.
fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    midnight
        .and_local_timezone(Local)
        .earliest()
        .map_or_else(Utc::now, |dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use restaurant_orders_core::CategoryId;
    use rust_decimal_macros::dec;

    fn menu_item(id: i64, name: &str, price: Decimal, available: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(id),
            category_id: CategoryId::new(1),
            name: name.to_owned(),
            description: None,
            price,
            is_available: available,
            is_featured: false,
            display_order: 0,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn snapshot_copies_name_and_price() {
        let item = menu_item(1, "Pad Thai", dec!(9.50), true);
        let line = snapshot_line(&item, 3).unwrap();

        assert_eq!(line.menu_item_id, MenuItemId::new(1));
        assert_eq!(line.menu_item_name, "Pad Thai");
        assert_eq!(line.price_at_time, dec!(9.50));
        assert_eq!(line.subtotal, dec!(28.50));
    }

    #[test]
    fn subtotal_is_exact_decimal_product() {
        let item = menu_item(2, "Spring Rolls", dec!(4.25), true);
        let line = snapshot_line(&item, 7).unwrap();
        assert_eq!(line.subtotal, dec!(29.75));

        // A price that would drift under binary floating point.
        let item = menu_item(3, "Iced Tea", dec!(0.10), true);
        let line = snapshot_line(&item, 3).unwrap();
        assert_eq!(line.subtotal, dec!(0.30));
    }

    #[test]
    fn unavailable_item_is_a_business_error() {
        let item = menu_item(2, "Spring Rolls", dec!(4.25), false);
        let err = snapshot_line(&item, 1).unwrap_err();

        assert!(matches!(err, AppError::Business(_)));
        assert!(err.to_string().contains("Spring Rolls"));
    }

    #[test]
    fn totals_accumulate_across_lines() {
        let lines = [
            snapshot_line(&menu_item(1, "Pad Thai", dec!(9.50), true), 2).unwrap(),
            snapshot_line(&menu_item(2, "Spring Rolls", dec!(4.25), true), 1).unwrap(),
        ];
        let total: Decimal = lines.iter().map(|l| l.subtotal).sum();
        assert_eq!(total, dec!(23.25));
    }

    #[test]
    fn start_of_day_is_before_now() {
        let start = start_of_day_utc(Local::now().date_naive());
        assert!(start <= Utc::now());
    }
}
