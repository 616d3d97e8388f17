//! API error handling for the custodia web API.
//!
//! Failures surface as a bare `{"message": ...}` body plus an HTTP
//! status; no structured error codes are exposed to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::CustodiaError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub message: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Create a bad request error (400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create an unauthorized error (401).
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Create a not found error (404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create an internal server error (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Create a bad request error from validator results.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = Vec::new();

        for (field, field_errors) in errors.field_errors() {
            for e in field_errors {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {field}"));
                messages.push(message);
            }
        }
        messages.sort();

        Self::bad_request(messages.join(", "))
    }

    /// The HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The client-visible message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<CustodiaError> for ApiError {
    fn from(err: CustodiaError) -> Self {
        match &err {
            CustodiaError::Auth(msg) => ApiError::unauthorized(msg.clone()),
            CustodiaError::Token(_) => ApiError::unauthorized("invalid or expired token"),
            CustodiaError::NotFound(_) => ApiError::not_found(err.to_string()),
            CustodiaError::Conflict(msg) | CustodiaError::Precondition(msg) => {
                ApiError::bad_request(msg.clone())
            }
            CustodiaError::Validation(_) | CustodiaError::Notification(_) => {
                ApiError::bad_request(err.to_string())
            }
            CustodiaError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                ApiError::bad_request(err.to_string())
            }
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("an internal error occurred")
            }
        }
    }
}
