//! # Gateway Errors
//!
//! Every failure a handler can produce, rendered as `{success:false, message}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::query::ValidationError;
use crate::queries::ExecError;
use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected input, never reached the store
    #[error("{0}")]
    BadRequest(String),

    /// Login rejection
    #[error("Invalid credentials")]
    Unauthorized,

    /// Empty condition list on the selection endpoint.
    ///
    /// Reported as 500 rather than 400; existing clients depend on it.
    #[error("No conditions provided")]
    NoConditions,

    /// Store failure with a best-effort message for the client
    #[error("{0}")]
    Failed(String),

    /// Store failure without detail
    #[error("request failed")]
    Opaque,
}

impl ApiError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NoConditions => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Opaque => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log a store failure and surface its hint
    pub fn hinted(operation: &'static str, err: StoreError) -> Self {
        tracing::error!(event = "STORE_FAILURE", operation, error = %err);
        if err.is_timeout() {
            return ApiError::Failed("Operation timed out".to_string());
        }
        ApiError::Failed(err.hint())
    }

    /// Log a store failure and surface a fixed message
    pub fn generic(operation: &'static str, message: &str, err: StoreError) -> Self {
        tracing::error!(event = "STORE_FAILURE", operation, error = %err);
        ApiError::Failed(message.to_string())
    }

    /// Map an executor failure, hinting on store errors
    pub fn from_exec(operation: &'static str, err: ExecError) -> Self {
        match err {
            ExecError::Validation(e) => e.into(),
            ExecError::Store(e) => Self::hinted(operation, e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::NoConditions => ApiError::NoConditions,
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized,
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let message = match err {
            ApiError::Opaque => None,
            other => Some(other.to_string()),
        };
        Self {
            success: false,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
