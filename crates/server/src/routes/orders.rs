//! Order endpoints: creation, lookup, listing, status updates, statistics.

use std::collections::HashMap;
use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use restaurant_orders_core::{
    MenuItemId, OrderId, OrderItemId, OrderStatus, Page, PageRequest, SortDirection,
};

use crate::db::OrderSortField;
use crate::error::AppError;
use crate::models::{Order, OrderItem};
use crate::response::ApiResponse;
use crate::services::{CreateOrder, ListOrders, OrderLine, OrderService, TodayStats};
use crate::state::AppState;

/// Maximum line quantity accepted per order item.
const MAX_QUANTITY: i32 = 99;
/// Maximum customer name length.
const MAX_NAME_LENGTH: usize = 200;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/stats/today", get(today_stats))
        .route("/orders/{order_id}", get(get_order))
        .route(
            "/orders/{order_id}/status",
            get(get_order_status).put(update_order_status),
        )
}

// =============================================================================
// Request DTOs
// =============================================================================

/// Request body for `POST /orders`.
///
/// Fields are optional at the serde level so that missing values surface as
/// a field-level validation map rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub notes: Option<String>,
    pub items: Option<Vec<OrderItemRequest>>,
}

/// One requested line in `POST /orders`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub menu_item_id: Option<i64>,
    pub quantity: Option<i32>,
}

impl CreateOrderRequest {
    /// Validate the request into a service command.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` with a field-to-message map covering
    /// every invalid field.
    pub fn validate(self) -> Result<CreateOrder, AppError> {
        let mut errors = HashMap::new();

        let customer_name = match self.customer_name.as_deref().map(str::trim) {
            // The cap is in characters, not bytes; multibyte names count
            // the same as ASCII ones.
            Some(name) if !name.is_empty() && name.chars().count() <= MAX_NAME_LENGTH => {
                Some(name.to_owned())
            }
            Some(name) if name.is_empty() => {
                errors.insert("customerName".into(), "Customer name is required".into());
                None
            }
            Some(_) => {
                errors.insert(
                    "customerName".into(),
                    format!("Customer name must not exceed {MAX_NAME_LENGTH} characters"),
                );
                None
            }
            None => {
                errors.insert("customerName".into(), "Customer name is required".into());
                None
            }
        };

        let customer_phone = match self.customer_phone.as_deref() {
            Some(raw) => match raw.parse() {
                Ok(phone) => Some(phone),
                Err(e) => {
                    errors.insert("customerPhone".into(), format!("{e}"));
                    None
                }
            },
            None => {
                errors.insert("customerPhone".into(), "Customer phone is required".into());
                None
            }
        };

        let customer_email = match self.customer_email.as_deref() {
            Some(raw) => match raw.parse() {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.insert("customerEmail".into(), format!("{e}"));
                    None
                }
            },
            None => None,
        };

        let customer_address = match self.customer_address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => Some(address.to_owned()),
            _ => {
                errors.insert(
                    "customerAddress".into(),
                    "Customer address is required".into(),
                );
                None
            }
        };

        let lines = match self.items {
            Some(items) if !items.is_empty() => {
                let mut lines = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    match item.validate() {
                        Ok(line) => lines.push(line),
                        Err((field, message)) => {
                            errors.insert(format!("items[{index}].{field}"), message);
                        }
                    }
                }
                lines
            }
            _ => {
                errors.insert(
                    "items".into(),
                    "Order must contain at least one item".into(),
                );
                Vec::new()
            }
        };

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        // All fields present when the error map is empty.
        match (customer_name, customer_phone, customer_address) {
            (Some(customer_name), Some(customer_phone), Some(customer_address)) => Ok(CreateOrder {
                customer_name,
                customer_phone,
                customer_email,
                customer_address,
                notes: self.notes,
                lines,
            }),
            _ => Err(AppError::Internal("validation invariant broken".into())),
        }
    }
}

impl OrderItemRequest {
    fn validate(&self) -> Result<OrderLine, (&'static str, String)> {
        let menu_item_id = match self.menu_item_id {
            Some(id) if id > 0 => MenuItemId::new(id),
            Some(_) => return Err(("menuItemId", "Menu item ID must be positive".into())),
            None => return Err(("menuItemId", "Menu item ID is required".into())),
        };

        let quantity = match self.quantity {
            Some(q) if (1..=MAX_QUANTITY).contains(&q) => q,
            Some(_) => {
                return Err((
                    "quantity",
                    format!("Quantity must be between 1 and {MAX_QUANTITY}"),
                ));
            }
            None => return Err(("quantity", "Quantity is required".into())),
        };

        Ok(OrderLine {
            menu_item_id,
            quantity,
        })
    }
}

/// Request body for `PUT /orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Query parameters for the order listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub status: Option<String>,
}

impl ListOrdersQuery {
    fn into_params(self) -> Result<ListOrders, AppError> {
        let sort = match self.sort_by.as_deref() {
            None => OrderSortField::default(),
            Some(raw) => OrderSortField::from_param(raw)
                .ok_or_else(|| AppError::InvalidArgument(format!("unknown sort field: {raw}")))?,
        };

        let direction = self
            .sort_dir
            .as_deref()
            .map_or(SortDirection::Desc, SortDirection::parse_lenient);

        let status = self
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(OrderStatus::from_str)
            .transpose()
            .map_err(|e| AppError::InvalidArgument(e.to_string()))?;

        Ok(ListOrders {
            page: PageRequest::new(self.page.unwrap_or(0), self.size.unwrap_or(20)),
            sort,
            direction,
            status,
        })
    }
}

// =============================================================================
// Response DTOs
// =============================================================================

/// Order representation returned by all order endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub customer_address: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Omitted for listing queries that do not load items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderItemResponse>,
}

/// Line item representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: OrderItemId,
    pub menu_item_name: String,
    pub quantity: i32,
    pub price_at_time: Decimal,
    pub subtotal: Decimal,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone.into_inner(),
            customer_email: order.customer_email.map(restaurant_orders_core::Email::into_inner),
            customer_address: order.customer_address,
            total_amount: order.total_amount,
            status: order.status,
            notes: order.notes,
            created_at: order.created_at,
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            menu_item_name: item.menu_item_name,
            quantity: item.quantity,
            price_at_time: item.price_at_time,
            subtotal: item.subtotal,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a new order.
///
/// # Errors
///
/// Returns 400 for validation and business errors, 404 for unknown menu
/// items.
async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), AppError> {
    let input = body.validate()?;
    let order = OrderService::new(state.pool()).create_order(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Order created successfully",
            order.into(),
        )),
    ))
}

/// Fetch an order with its items.
///
/// # Errors
///
/// Returns 404 if the order does not exist.
async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<Json<ApiResponse<OrderResponse>>, AppError> {
    let order = OrderService::new(state.pool())
        .get_order(OrderId::new(order_id))
        .await?;

    Ok(Json(ApiResponse::success(order.into())))
}

/// Fetch just an order's status string.
///
/// # Errors
///
/// Returns 404 if the order does not exist.
async fn get_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    let order = OrderService::new(state.pool())
        .get_order(OrderId::new(order_id))
        .await?;

    Ok(Json(ApiResponse::success(order.status.to_string())))
}

/// List orders page by page.
///
/// # Errors
///
/// Returns 400 for an unknown status filter or sort field.
async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<ApiResponse<Page<OrderResponse>>>, AppError> {
    let params = query.into_params()?;
    let page = OrderService::new(state.pool()).list_orders(params).await?;

    Ok(Json(ApiResponse::success(page.map(Into::into))))
}

/// Update an order's status.
///
/// # Errors
///
/// Returns 404 for an unknown order, 400 for an unknown status value.
async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, AppError> {
    let raw_status = body.status.as_deref().ok_or_else(|| {
        let fields = [("status".to_owned(), "Status is required".to_owned())];
        AppError::Validation(fields.into_iter().collect())
    })?;

    let new_status = OrderStatus::from_str(raw_status)
        .map_err(|e| AppError::InvalidArgument(e.to_string()))?;

    let order = OrderService::new(state.pool())
        .update_order_status(OrderId::new(order_id), new_status, body.notes.as_deref())
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        "Order status updated successfully",
        order.into(),
    )))
}

/// Today's order statistics.
///
/// # Errors
///
/// Returns 500 if aggregation fails.
async fn today_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TodayStats>>, AppError> {
    let stats = OrderService::new(state.pool()).today_stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateOrderRequest {
        CreateOrderRequest {
            customer_name: Some("Ada Lovelace".into()),
            customer_phone: Some("+15550001234".into()),
            customer_email: Some("ada@example.com".into()),
            customer_address: Some("12 Analytical Way".into()),
            notes: Some("ring twice".into()),
            items: Some(vec![OrderItemRequest {
                menu_item_id: Some(1),
                quantity: Some(2),
            }]),
        }
    }

    #[test]
    fn valid_request_becomes_command() {
        let input = valid_request().validate().unwrap();
        assert_eq!(input.customer_name, "Ada Lovelace");
        assert_eq!(input.customer_phone.as_str(), "+15550001234");
        assert_eq!(input.lines.len(), 1);
        assert_eq!(input.lines[0].menu_item_id, MenuItemId::new(1));
        assert_eq!(input.lines[0].quantity, 2);
    }

    #[test]
    fn email_is_optional() {
        let mut request = valid_request();
        request.customer_email = None;
        let input = request.validate().unwrap();
        assert!(input.customer_email.is_none());
    }

    #[test]
    fn missing_fields_collect_into_one_map() {
        let err = CreateOrderRequest::default().validate().unwrap_err();
        let AppError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.contains_key("customerName"));
        assert!(fields.contains_key("customerPhone"));
        assert!(fields.contains_key("customerAddress"));
        assert!(fields.contains_key("items"));
    }

    #[test]
    fn name_cap_counts_characters_not_bytes() {
        // 150 two-byte characters: 300 bytes, well within the 200-char cap.
        let mut request = valid_request();
        request.customer_name = Some("é".repeat(150));
        assert!(request.validate().is_ok());

        let mut request = valid_request();
        request.customer_name = Some("a".repeat(MAX_NAME_LENGTH + 1));
        let AppError::Validation(fields) = request.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        assert!(fields.contains_key("customerName"));
    }

    #[test]
    fn quantity_bounds_are_enforced() {
        for bad in [0, -1, 100] {
            let mut request = valid_request();
            request.items = Some(vec![OrderItemRequest {
                menu_item_id: Some(1),
                quantity: Some(bad),
            }]);
            let AppError::Validation(fields) = request.validate().unwrap_err() else {
                panic!("expected validation error");
            };
            assert!(fields.contains_key("items[0].quantity"));
        }
    }

    #[test]
    fn empty_items_rejected() {
        let mut request = valid_request();
        request.items = Some(vec![]);
        let AppError::Validation(fields) = request.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        assert!(fields.contains_key("items"));
    }

    #[test]
    fn malformed_phone_rejected() {
        let mut request = valid_request();
        request.customer_phone = Some("555-0001".into());
        let AppError::Validation(fields) = request.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        assert!(fields.contains_key("customerPhone"));
    }

    #[test]
    fn listing_query_parses_defaults() {
        let params = ListOrdersQuery::default().into_params().unwrap();
        assert_eq!(params.page.page(), 0);
        assert_eq!(params.page.size(), 20);
        assert_eq!(params.sort, OrderSortField::CreatedAt);
        assert_eq!(params.direction, SortDirection::Desc);
        assert!(params.status.is_none());
    }

    #[test]
    fn listing_query_rejects_unknown_status() {
        let query = ListOrdersQuery {
            status: Some("SHIPPED".into()),
            ..Default::default()
        };
        assert!(matches!(
            query.into_params().unwrap_err(),
            AppError::InvalidArgument(_)
        ));
    }

    #[test]
    fn listing_query_accepts_status_filter() {
        let query = ListOrdersQuery {
            status: Some("cancelled".into()),
            sort_by: Some("totalAmount".into()),
            sort_dir: Some("asc".into()),
            ..Default::default()
        };
        let params = query.into_params().unwrap();
        assert_eq!(params.status, Some(OrderStatus::Cancelled));
        assert_eq!(params.sort, OrderSortField::TotalAmount);
        assert_eq!(params.direction, SortDirection::Asc);
    }
}
