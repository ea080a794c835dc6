//! Error types for the computer catalog
//!
//! All errors use thiserror for structured error handling.
//! Every variant maps to a stable error code and an HTTP status, so the
//! routes can return `AppError` directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Stable, machine-readable error codes sent in JSON error bodies.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
    pub const INCONSISTENT_STATE: &str = "INCONSISTENT_STATE";
    pub const INTERNAL: &str = "INTERNAL";
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Computer not found: {0}")]
    ComputerNotFound(String),

    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A multi-step image replace was only partially applied.
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ComputerNotFound(_) | AppError::ImageNotFound(_) => error_code::NOT_FOUND,
            AppError::InvalidInput(_) => error_code::INVALID_INPUT,
            AppError::StoreUnavailable(_) => error_code::STORE_UNAVAILABLE,
            AppError::InconsistentState(_) => error_code::INCONSISTENT_STATE,
            AppError::Io(_) => error_code::INTERNAL,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ComputerNotFound(_) | AppError::ImageNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InconsistentState(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller may retry the operation (with its own backoff).
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::StoreUnavailable(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::ComputerNotFound(_) | AppError::ImageNotFound(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
