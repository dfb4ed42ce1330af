//! Database seeding command.
//!
//! Inserts a small sample menu and a couple of customers so the API can be
//! exercised locally. Refuses to run against a database that already has
//! categories.

use sqlx::PgPool;

use restaurant_orders_core::{Email, Phone};
use restaurant_orders_server::db;
use restaurant_orders_server::services::CustomerService;

use super::CommandError;

/// Sample menu: (category, items as (name, price, featured, available)).
const SAMPLE_MENU: &[(&str, &[(&str, &str, bool, bool)])] = &[
    (
        "Starters",
        &[
            ("Spring Rolls", "4.25", false, true),
            ("Satay Skewers", "6.50", true, true),
        ],
    ),
    (
        "Mains",
        &[
            ("Pad Thai", "9.50", true, true),
            ("Green Curry", "10.75", false, true),
            ("Fried Rice", "8.00", false, true),
        ],
    ),
    (
        "Drinks",
        &[
            ("Iced Tea", "2.50", false, true),
            // Off the menu, for exercising the unavailable-item rejection.
            ("Durian Shake", "5.00", false, false),
        ],
    ),
];

/// Seed sample data.
///
/// # Errors
///
/// Returns `CommandError::Seed` if the database already contains categories,
/// or `CommandError::Database` on query failure.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        return Err(CommandError::Seed(
            "database already contains categories; refusing to seed".into(),
        ));
    }

    seed_menu(&pool).await?;
    seed_customers(&pool).await?;

    tracing::info!("Seeding complete");
    Ok(())
}

async fn seed_menu(pool: &PgPool) -> Result<(), CommandError> {
    for (position, (category_name, items)) in SAMPLE_MENU.iter().enumerate() {
        let category_id: i64 = sqlx::query_scalar(
            "INSERT INTO categories (name, display_order) VALUES ($1, $2) RETURNING id",
        )
        .bind(category_name)
        .bind(i32::try_from(position).unwrap_or(0))
        .fetch_one(pool)
        .await?;

        for (order, (name, price, featured, available)) in items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO menu_items \
                    (category_id, name, price, is_featured, is_available, display_order) \
                 VALUES ($1, $2, $3::numeric, $4, $5, $6)",
            )
            .bind(category_id)
            .bind(name)
            .bind(price)
            .bind(featured)
            .bind(available)
            .bind(i32::try_from(order).unwrap_or(0))
            .execute(pool)
            .await?;
        }

        tracing::info!(category = category_name, items = items.len(), "Seeded category");
    }

    Ok(())
}

async fn seed_customers(pool: &PgPool) -> Result<(), CommandError> {
    let customers = CustomerService::new(pool);

    let phone = Phone::parse("+15550001234")
        .map_err(|e| CommandError::Seed(format!("invalid sample phone: {e}")))?;
    let email = Email::parse("ada@example.com")
        .map_err(|e| CommandError::Seed(format!("invalid sample email: {e}")))?;

    customers
        .find_or_create("Ada Lovelace", &phone, Some(&email), Some("12 Analytical Way"))
        .await
        .map_err(|e| CommandError::Seed(format!("failed to seed customer: {e}")))?;

    let phone = Phone::parse("+15550005678")
        .map_err(|e| CommandError::Seed(format!("invalid sample phone: {e}")))?;

    customers
        .find_or_create("Grace Hopper", &phone, None, None)
        .await
        .map_err(|e| CommandError::Seed(format!("failed to seed customer: {e}")))?;

    tracing::info!("Seeded sample customers");
    Ok(())
}
