//! Database migration command.
//!
//! Migration files live in `crates/server/migrations/` and are embedded at
//! compile time.

use restaurant_orders_server::db;

use super::CommandError;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if `DATABASE_URL` is unset, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
