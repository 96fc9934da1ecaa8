//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service, and the single
//! place where core error kinds are mapped to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::error;

use crate::config::ConfigError;
use study_assistant_core::ports::PortError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Maps the closed core taxonomy onto HTTP statuses:
/// NotFound -> 404, InvalidState -> 400, ServiceUnavailable -> 503,
/// GenerationFormat -> 500 (with a retry hint), everything else -> 500.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Port(PortError::NotFound(message)) => {
                (StatusCode::NOT_FOUND, message.clone())
            }
            ApiError::Port(PortError::InvalidState(message)) => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            ApiError::Port(PortError::ServiceUnavailable(message)) => {
                (StatusCode::SERVICE_UNAVAILABLE, message.clone())
            }
            ApiError::Port(PortError::GenerationFormat(message)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{message}. Try running the generation again."),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        if status.is_server_error() {
            error!("Request failed: {:?}", self);
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}
