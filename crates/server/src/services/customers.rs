//! Customer directory service.
//!
//! Operates independently of the order path: orders carry their own contact
//! snapshot and never reference a customer row.

use sqlx::PgPool;

use restaurant_orders_core::{CustomerId, Email, Phone};

use crate::db::{CustomerRepository, RepositoryError};
use crate::error::AppError;
use crate::models::{Customer, NewCustomer, UpdateCustomer};

/// Service for customer directory operations.
pub struct CustomerService<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerService<'a> {
    /// Create a new customer service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all customers.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` on query failure.
    pub async fn list_all(&self) -> Result<Vec<Customer>, AppError> {
        Ok(CustomerRepository::new(self.pool).list_all().await?)
    }

    /// Fetch a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no customer with the ID exists, or
    /// `AppError::Database` on query failure.
    pub async fn get(&self, id: CustomerId) -> Result<Customer, AppError> {
        CustomerRepository::new(self.pool)
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer not found with id: {id}")))
    }

    /// Fetch a customer by phone number.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no customer with the phone exists, or
    /// `AppError::Database` on query failure.
    pub async fn get_by_phone(&self, phone: &Phone) -> Result<Customer, AppError> {
        CustomerRepository::new(self.pool)
            .find_by_phone(phone)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer not found with phone: {phone}")))
    }

    /// Fetch a customer by email address.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no customer with the email exists, or
    /// `AppError::Database` on query failure.
    pub async fn get_by_email(&self, email: &Email) -> Result<Customer, AppError> {
        CustomerRepository::new(self.pool)
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer not found with email: {email}")))
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Duplicate` if the phone (or email) is already in
    /// use, or `AppError::Database` on failure.
    pub async fn create(&self, new: NewCustomer) -> Result<Customer, AppError> {
        let customer = CustomerRepository::new(self.pool).insert(&new).await?;
        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Apply a partial update to a customer.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the customer does not exist,
    /// `AppError::Duplicate` if the new phone belongs to a different
    /// customer, or `AppError::Database` on failure.
    pub async fn update(
        &self,
        id: CustomerId,
        changes: UpdateCustomer,
    ) -> Result<Customer, AppError> {
        match CustomerRepository::new(self.pool).update(id, &changes).await {
            Ok(customer) => Ok(customer),
            Err(RepositoryError::NotFound) => {
                Err(AppError::NotFound(format!("Customer not found with id: {id}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a customer.
    ///
    /// Orders are unaffected: they hold a contact snapshot, not a reference.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the customer does not exist, or
    /// `AppError::Database` on failure.
    pub async fn delete(&self, id: CustomerId) -> Result<(), AppError> {
        match CustomerRepository::new(self.pool).delete(id).await {
            Ok(()) => {
                tracing::info!(customer_id = %id, "Customer deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                Err(AppError::NotFound(format!("Customer not found with id: {id}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find a customer by phone, creating or refreshing the record.
    ///
    /// When the phone is already known, any provided name, email, or address
    /// overwrites the stored value; otherwise a new customer is created.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Duplicate` if a provided email belongs to another
    /// customer, or `AppError::Database` on failure.
    pub async fn find_or_create(
        &self,
        name: &str,
        phone: &Phone,
        email: Option<&Email>,
        address: Option<&str>,
    ) -> Result<Customer, AppError> {
        let repo = CustomerRepository::new(self.pool);

        if let Some(existing) = repo.find_by_phone(phone).await? {
            let changes = UpdateCustomer {
                name: Some(name.to_owned()),
                phone: None,
                email: email.cloned(),
                address: address.map(str::to_owned),
            };
            return Ok(repo.update(existing.id, &changes).await?);
        }

        let new = NewCustomer {
            name: name.to_owned(),
            phone: phone.clone(),
            email: email.cloned(),
            address: address.map(str::to_owned),
        };
        Ok(repo.insert(&new).await?)
    }
}
