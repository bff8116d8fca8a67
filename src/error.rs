//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the service returns [`AppError`]. Each variant
//! carries a human-readable `message` and structured JSON `details`, and maps
//! to a stable machine-readable code in the response body:
//!
//! ```json
//! { "error": { "code": "invalid_code", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Name of the uniqueness constraint on `links.code`.
pub const CODE_UNIQUE_CONSTRAINT: &str = "links_code_key";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// The long URL is missing or is not an http(s) URL.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    /// The short code does not match the 5-character alphanumeric format.
    #[error("{message}")]
    InvalidCode { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The store rejected an insert because the code is already taken.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// No free code could be found within the attempt budget.
    #[error("{message}")]
    ConflictExhausted { message: String, details: Value },

    #[error("{message}")]
    Store { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_code(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCode {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn conflict_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::ConflictExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        match self {
            AppError::InvalidInput { message, details } => {
                (StatusCode::BAD_REQUEST, "invalid_input", message, details)
            }
            AppError::InvalidCode { message, details } => {
                (StatusCode::BAD_REQUEST, "invalid_code", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::ConflictExhausted { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "conflict_exhausted",
                message,
                details,
            ),
            AppError::Store { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                message,
                details,
            ),
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
            && db.constraint() == Some(CODE_UNIQUE_CONSTRAINT)
        {
            return AppError::conflict(
                "Short code already exists",
                json!({ "constraint": CODE_UNIQUE_CONSTRAINT }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::store("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::invalid_input("Request validation failed", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::invalid_input("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::invalid_code("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("x", json!({})).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::conflict_exhausted("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::store("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_info_carries_code_and_details() {
        let err = AppError::invalid_code("Invalid short code", json!({ "code": "ab" }));
        let info = err.to_error_info();

        assert_eq!(info.code, "invalid_code");
        assert_eq!(info.message, "Invalid short code");
        assert_eq!(info.details["code"], "ab");
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::not_found("Short link not found", json!({}));
        assert_eq!(err.to_string(), "Short link not found");
    }

    #[test]
    fn test_non_database_sqlx_error_maps_to_store() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Store { .. }));
    }
}
