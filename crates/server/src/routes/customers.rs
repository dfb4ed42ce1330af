//! Customer directory endpoints.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use restaurant_orders_core::{CustomerId, Email, Phone};

use crate::error::AppError;
use crate::models::{Customer, NewCustomer, UpdateCustomer};
use crate::response::ApiResponse;
use crate::services::CustomerService;
use crate::state::AppState;

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{customer_id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/customers/phone/{phone}", get(get_customer_by_phone))
}

// =============================================================================
// DTOs
// =============================================================================

/// Request body for `POST /customers`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl CreateCustomerRequest {
    fn validate(self) -> Result<NewCustomer, AppError> {
        let mut errors = HashMap::new();

        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(name.to_owned()),
            _ => {
                errors.insert("name".into(), "Name is required".into());
                None
            }
        };

        let phone = match self.phone.as_deref() {
            Some(raw) => match Phone::parse(raw) {
                Ok(phone) => Some(phone),
                Err(e) => {
                    errors.insert("phone".into(), e.to_string());
                    None
                }
            },
            None => {
                errors.insert("phone".into(), "Phone is required".into());
                None
            }
        };

        let email = match self.email.as_deref() {
            Some(raw) => match Email::parse(raw) {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.insert("email".into(), e.to_string());
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        match (name, phone) {
            (Some(name), Some(phone)) => Ok(NewCustomer {
                name,
                phone,
                email,
                address: self.address,
            }),
            _ => Err(AppError::Internal("validation invariant broken".into())),
        }
    }
}

/// Request body for `PUT /customers/{id}`; omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl UpdateCustomerRequest {
    fn validate(self) -> Result<UpdateCustomer, AppError> {
        let mut errors = HashMap::new();

        let phone = match self.phone.as_deref() {
            Some(raw) => match Phone::parse(raw) {
                Ok(phone) => Some(phone),
                Err(e) => {
                    errors.insert("phone".into(), e.to_string());
                    None
                }
            },
            None => None,
        };

        let email = match self.email.as_deref() {
            Some(raw) => match Email::parse(raw) {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.insert("email".into(), e.to_string());
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        Ok(UpdateCustomer {
            name: self.name,
            phone,
            email,
            address: self.address,
        })
    }
}

/// Customer representation returned by all customer endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            phone: customer.phone.into_inner(),
            email: customer.email.map(Email::into_inner),
            address: customer.address,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List all customers.
///
/// # Errors
///
/// Returns 500 on database failure.
async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CustomerResponse>>>, AppError> {
    let customers = CustomerService::new(state.pool()).list_all().await?;
    Ok(Json(ApiResponse::success(
        customers.into_iter().map(Into::into).collect(),
    )))
}

/// Fetch a customer by ID.
///
/// # Errors
///
/// Returns 404 if the customer does not exist.
async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CustomerResponse>>, AppError> {
    let customer = CustomerService::new(state.pool())
        .get(CustomerId::new(customer_id))
        .await?;
    Ok(Json(ApiResponse::success(customer.into())))
}

/// Fetch a customer by phone number.
///
/// # Errors
///
/// Returns 400 for a malformed phone, 404 if no customer matches.
async fn get_customer_by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<ApiResponse<CustomerResponse>>, AppError> {
    let phone = Phone::parse(&phone).map_err(|e| {
        let fields = [("phone".to_owned(), e.to_string())];
        AppError::Validation(fields.into_iter().collect())
    })?;

    let customer = CustomerService::new(state.pool()).get_by_phone(&phone).await?;
    Ok(Json(ApiResponse::success(customer.into())))
}

/// Create a customer.
///
/// # Errors
///
/// Returns 400 for validation errors or a duplicate phone/email.
async fn create_customer(
    State(state): State<AppState>,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerResponse>>), AppError> {
    let new = body.validate()?;
    let customer = CustomerService::new(state.pool()).create(new).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Customer created successfully",
            customer.into(),
        )),
    ))
}

/// Apply a partial update to a customer.
///
/// # Errors
///
/// Returns 404 for an unknown customer, 400 for validation errors or a
/// phone/email collision.
async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(body): Json<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerResponse>>, AppError> {
    let changes = body.validate()?;
    let customer = CustomerService::new(state.pool())
        .update(CustomerId::new(customer_id), changes)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        "Customer updated successfully",
        customer.into(),
    )))
}

/// Delete a customer.
///
/// # Errors
///
/// Returns 404 if the customer does not exist.
async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    CustomerService::new(state.pool())
        .delete(CustomerId::new(customer_id))
        .await?;

    Ok(Json(ApiResponse {
        success: true,
        message: Some("Customer deleted successfully".into()),
        data: None,
        error: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_name_and_phone() {
        let err = CreateCustomerRequest::default().validate().unwrap_err();
        let AppError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("phone"));
    }

    #[test]
    fn create_accepts_minimal_customer() {
        let request = CreateCustomerRequest {
            name: Some("Grace Hopper".into()),
            phone: Some("5550001234".into()),
            ..Default::default()
        };
        let new = request.validate().unwrap();
        assert_eq!(new.name, "Grace Hopper");
        assert!(new.email.is_none());
        assert!(new.address.is_none());
    }

    #[test]
    fn update_rejects_malformed_email() {
        let request = UpdateCustomerRequest {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(matches!(
            request.validate().unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn update_with_no_fields_is_a_noop_change_set() {
        let changes = UpdateCustomerRequest::default().validate().unwrap();
        assert!(changes.name.is_none());
        assert!(changes.phone.is_none());
        assert!(changes.email.is_none());
        assert!(changes.address.is_none());
    }
}
