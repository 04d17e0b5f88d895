//! Centralized error handling.
//!
//! Every failure a handler can produce is an [`AppError`]. The axum
//! `IntoResponse` impl is the single place where errors become status codes
//! and the `{ success: false, error: { message, details } }` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Whether 500 responses carry a debug `stack` field. Set once at startup.
static EXPOSE_STACK: OnceCell<bool> = OnceCell::new();

/// Enable or disable debug details on internal error responses.
///
/// Only the first call has an effect.
pub fn expose_error_stack(enabled: bool) {
    if EXPOSE_STACK.set(enabled).is_err() {
        tracing::debug!("Error stack exposure already configured");
    }
}

fn stack_exposed() -> bool {
    EXPOSE_STACK.get().copied().unwrap_or(false)
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Input failed validation; carries every violated rule
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// Malformed request (bad id, unreadable body)
    #[error("{message}")]
    BadRequest { message: String, details: String },

    /// No user with the given id
    #[error("User not found")]
    NotFound(i64),

    /// Duplicate email
    #[error("{message}")]
    Conflict { message: String, details: String },

    /// No route matched the request
    #[error("Route not found")]
    RouteNotFound { method: String, path: String },

    #[error("Request entity too large")]
    PayloadTooLarge,

    /// Record store failure
    #[error("Database error: {0}")]
    Store(#[from] sea_orm::DbErr),

    /// Anything not classified above
    #[error("{0}")]
    Internal(String),
}

/// Error response envelope
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
}

impl AppError {
    /// Get error code (used in logs)
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict { .. } => "CONFLICT",
            AppError::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
            AppError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Internal(_) => "UNHANDLED_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing details for the envelope
    fn details(&self) -> Option<Value> {
        match self {
            AppError::Validation(errors) => Some(Value::from(errors.clone())),
            AppError::BadRequest { details, .. } | AppError::Conflict { details, .. } => {
                Some(Value::from(details.as_str()))
            }
            AppError::NotFound(id) => Some(Value::from(format!("No user found with ID {}", id))),
            AppError::RouteNotFound { method, path } => {
                Some(Value::from(format!("Cannot {} {}", method, path)))
            }
            AppError::PayloadTooLarge | AppError::Store(_) | AppError::Internal(_) => None,
        }
    }

    /// Debug form of the underlying store error, only outside production
    fn stack(&self) -> Option<String> {
        match self {
            AppError::Store(e) if stack_exposed() => Some(format!("{:?}", e)),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = ?self, "Request failed");
        }

        let body = ErrorResponse {
            success: false,
            error: ErrorBody {
                message: self.to_string(),
                details: self.details(),
                stack: self.stack(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, id: i64) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, id: i64) -> AppResult<T> {
        self.ok_or(AppError::NotFound(id))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(errors: Vec<String>) -> Self {
        AppError::Validation(errors)
    }

    pub fn bad_request(message: impl Into<String>, details: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn invalid_id() -> Self {
        Self::bad_request("Invalid user ID", "User ID must be a valid number")
    }

    pub fn conflict(message: impl Into<String>, details: impl Into<String>) -> Self {
        AppError::Conflict {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
