use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error;
use std::fmt;

use crate::service::ServiceError;
use crate::store::StoreError;
use crate::types::ValidationError;

/// HTTP-facing error for every handler.
///
/// Rendered as `{"error": "<message>"}` with the matching status code.
#[derive(Debug)]
pub enum AppError {
    /// For malformed path, query or body input.
    BadRequest(String),
    /// For item data that breaks a validation rule.
    Validation(ValidationError),
    /// For when a requested item does not exist.
    NotFound(String),
    /// For failures reported by the store.
    Database(String),
    /// For when the store cannot hand out a connection in time.
    ServiceUnavailable(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Database(msg) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "A database error occurred".to_string())
            }
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound("item not found".to_string()),
            StoreError::Database(sqlx::Error::PoolTimedOut) => {
                AppError::ServiceUnavailable("Database connection pool timed out".to_string())
            }
            StoreError::Database(e) => AppError::Database(e.to_string()),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => AppError::Validation(e),
            ServiceError::Store(e) => e.into(),
        }
    }
}

/// A type alias for `Result<T, AppError>`, used by every handler.
pub type AppResult<T> = Result<T, AppError>;
