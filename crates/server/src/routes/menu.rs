//! Menu catalog endpoints (read-only).

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;

use restaurant_orders_core::{CategoryId, MenuItemId};

use crate::db::MenuItemRepository;
use crate::error::AppError;
use crate::models::{Category, MenuItem};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Build the menu router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", get(list_menu))
        .route("/menu/featured", get(list_featured))
        .route("/menu/categories", get(list_categories))
        .route("/menu/categories/{category_id}", get(list_by_category))
}

/// Menu item representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    pub id: MenuItemId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
    pub is_featured: bool,
    pub display_order: i32,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            category_id: item.category_id,
            name: item.name,
            description: item.description,
            price: item.price,
            is_available: item.is_available,
            is_featured: item.is_featured,
            display_order: item.display_order,
        }
    }
}

/// Category representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub display_order: i32,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            display_order: category.display_order,
        }
    }
}

/// List all available menu items.
///
/// # Errors
///
/// Returns 500 on database failure.
async fn list_menu(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuItemResponse>>>, AppError> {
    let items = MenuItemRepository::new(state.pool()).list_available().await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(Into::into).collect(),
    )))
}

/// List featured, available menu items.
///
/// # Errors
///
/// Returns 500 on database failure.
async fn list_featured(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuItemResponse>>>, AppError> {
    let items = MenuItemRepository::new(state.pool()).list_featured().await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(Into::into).collect(),
    )))
}

/// List active categories.
///
/// # Errors
///
/// Returns 500 on database failure.
async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, AppError> {
    let categories = MenuItemRepository::new(state.pool()).list_categories().await?;
    Ok(Json(ApiResponse::success(
        categories.into_iter().map(Into::into).collect(),
    )))
}

/// List available menu items in one category.
///
/// # Errors
///
/// Returns 500 on database failure.
async fn list_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<MenuItemResponse>>>, AppError> {
    let items = MenuItemRepository::new(state.pool())
        .list_by_category(CategoryId::new(category_id))
        .await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(Into::into).collect(),
    )))
}
