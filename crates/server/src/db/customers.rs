//! Customer directory repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use restaurant_orders_core::{CustomerId, Email, Phone};

use super::RepositoryError;
use crate::models::{Customer, NewCustomer, UpdateCustomer};

const CUSTOMER_COLUMNS: &str = "id, name, phone, email, address, created_at, updated_at";

const PHONE_CONFLICT: &str = "phone number already in use";
const EMAIL_CONFLICT: &str = "email address already in use";

/// Pick the conflict message from the violated constraint's name.
///
/// Phone is the primary lookup key, so an unrecognized constraint falls back
/// to the phone message.
fn unique_conflict(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("customers_email_key") => EMAIL_CONFLICT,
        _ => PHONE_CONFLICT,
    }
}

/// Internal row type for customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    phone: String,
    email: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let phone = Phone::parse(&row.phone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
        })?;

        let email = row
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            name: row.name,
            phone,
            email,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for customer directory operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a customer by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a customer by their phone number, the directory's lookup key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_by_phone(&self, phone: &Phone) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE phone = $1"
        ))
        .bind(phone.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a customer by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert a new customer with a freshly generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the phone or email is already
    /// in use, or `RepositoryError::Database` for other failures.
    pub async fn insert(&self, new: &NewCustomer) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "INSERT INTO customers (id, name, phone, email, address) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(CustomerId::generate().as_uuid())
        .bind(&new.name)
        .bind(new.phone.as_str())
        .bind(new.email.as_ref().map(Email::as_str))
        .bind(new.address.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write_error(e, unique_conflict))?;

        row.try_into()
    }

    /// Apply a partial update; `None` fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer does not exist,
    /// `RepositoryError::Conflict` on a phone/email collision, or
    /// `RepositoryError::Database` for other failures.
    pub async fn update(
        &self,
        id: CustomerId,
        changes: &UpdateCustomer,
    ) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "UPDATE customers SET \
                name = COALESCE($2, name), \
                phone = COALESCE($3, phone), \
                email = COALESCE($4, email), \
                address = COALESCE($5, address), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(changes.name.as_deref())
        .bind(changes.phone.as_ref().map(Phone::as_str))
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(changes.address.as_deref())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write_error(e, unique_conflict))?;

        row.map_or(Err(RepositoryError::NotFound), TryInto::try_into)
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer does not exist,
    /// or `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_constraint_reports_email_conflict() {
        assert_eq!(unique_conflict(Some("customers_email_key")), EMAIL_CONFLICT);
    }

    #[test]
    fn phone_and_unknown_constraints_report_phone_conflict() {
        assert_eq!(unique_conflict(Some("customers_phone_key")), PHONE_CONFLICT);
        assert_eq!(unique_conflict(None), PHONE_CONFLICT);
    }
}
