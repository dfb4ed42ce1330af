//! Standard API response envelope.
//!
//! Every JSON endpoint wraps its payload in [`ApiResponse`]:
//!
//! ```json
//! {"success": true, "message": "...", "data": {...}}
//! {"success": false, "error": {"code": "NOT_FOUND", "message": "..."}}
//! ```

use serde::{Deserialize, Serialize};

/// Generic response wrapper used to standardize all API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    /// Success response with data.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// Success response with a human-readable message and data.
    #[must_use]
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// Error response.
    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(ErrorDetails {
                code: code.into(),
                message: message.into(),
                details: None,
            }),
        }
    }

    /// Error response with structured details (e.g. a field error map).
    #[must_use]
    pub fn error_with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(ErrorDetails {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_omits_error_fields() {
        let json = serde_json::to_value(ApiResponse::success(7)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 7);
        assert!(json.get("error").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn error_carries_code_and_message() {
        let resp: ApiResponse<()> = ApiResponse::error("NOT_FOUND", "order not found");
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "order not found");
    }
}
