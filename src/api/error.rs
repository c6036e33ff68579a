//! Error handling for the simulated API.
//!
//! Handlers never let a failure escape: every [`ApiError`] is folded into a
//! status code plus a JSON body with the exact shape the storefront UI
//! expects. Unauthorized responses carry `{"error": ...}`, everything else
//! carries `{"message": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::dispatch::MockResponse;

/// Error codes for API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Client errors (4xx)
    ValidationError,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,

    // Server errors (5xx)
    InternalError,
    NotMocked,
    BadGateway,
}

impl ErrorCode {
    /// Get the default HTTP status code for this error code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::NotMocked => StatusCode::NOT_IMPLEMENTED,
            ErrorCode::BadGateway => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get the string representation of the error code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::Unauthorized => "unauthorized",
            ErrorCode::Forbidden => "forbidden",
            ErrorCode::NotFound => "not_found",
            ErrorCode::MethodNotAllowed => "method_not_allowed",
            ErrorCode::InternalError => "internal_error",
            ErrorCode::NotMocked => "not_mocked",
            ErrorCode::BadGateway => "bad_gateway",
        }
    }
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
#[error("[{}] {}", .code.as_str(), .message)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn status(&self) -> StatusCode {
        self.code.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// JSON body sent on the wire
    pub fn body(&self) -> Value {
        match self.code {
            ErrorCode::Unauthorized => json!({ "error": self.message }),
            _ => json!({ "message": self.message }),
        }
    }

    // -------------------------------------------------------------------------
    // Convenience constructors
    // -------------------------------------------------------------------------

    /// Missing or empty required fields (400)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Bad credentials (401)
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::Unauthorized, "Unauthorized")
    }

    /// Role or ownership check failed (403)
    pub fn forbidden() -> Self {
        Self::new(ErrorCode::Forbidden, "unauthorized")
    }

    /// Nonexistent user or franchise (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Unsupported method on a mocked path (405)
    pub fn method_not_allowed() -> Self {
        Self::new(ErrorCode::MethodNotAllowed, "Method not allowed")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Request is outside the simulated surface and no upstream is configured (501)
    pub fn not_mocked() -> Self {
        Self::new(ErrorCode::NotMocked, "not mocked")
    }

    /// Pass-through upstream could not be reached (502)
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadGateway, message)
    }
}

impl From<ApiError> for MockResponse {
    fn from(err: ApiError) -> Self {
        MockResponse::new(err.status(), err.body())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Serialization error: {}", err);
        ApiError::internal("failed to encode response")
    }
}
