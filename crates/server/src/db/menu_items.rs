//! Menu catalog repository.
//!
//! Read-only: the order path looks items up and snapshots their name and
//! price; nothing here mutates the catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use restaurant_orders_core::{CategoryId, MenuItemId};

use super::RepositoryError;
use crate::models::{Category, MenuItem};

const MENU_ITEM_COLUMNS: &str = "id, category_id, name, description, price, \
     is_available, is_featured, display_order, created_at";

/// Internal row type for menu item queries.
#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: i64,
    category_id: i64,
    name: String,
    description: Option<String>,
    price: Decimal,
    is_available: bool,
    is_featured: bool,
    display_order: i32,
    created_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: MenuItemId::new(row.id),
            category_id: CategoryId::new(row.category_id),
            name: row.name,
            description: row.description,
            price: row.price,
            is_available: row.is_available,
            is_featured: row.is_featured,
            display_order: row.display_order,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for category queries.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    display_order: i32,
    is_active: bool,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            display_order: row.display_order,
            is_active: row.is_active,
        }
    }
}

/// Repository for menu catalog lookups.
pub struct MenuItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuItemRepository<'a> {
    /// Create a new menu item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a menu item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List all available menu items, ordered for display.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_available(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items \
             WHERE is_available = TRUE ORDER BY display_order ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List available menu items within one category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items \
             WHERE category_id = $1 AND is_available = TRUE \
             ORDER BY display_order ASC"
        ))
        .bind(category_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List featured, available menu items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_featured(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items \
             WHERE is_featured = TRUE AND is_available = TRUE \
             ORDER BY display_order ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List active categories, ordered for display.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, display_order, is_active FROM categories \
             WHERE is_active = TRUE ORDER BY display_order ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
