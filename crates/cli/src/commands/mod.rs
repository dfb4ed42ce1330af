//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Seed error: {0}")]
    Seed(String),
}

/// Read the database URL from the environment.
pub fn database_url() -> Result<SecretString, CommandError> {
    std::env::var("DATABASE_URL")
        .map(Into::into)
        .map_err(|_| CommandError::MissingEnvVar("DATABASE_URL"))
}
