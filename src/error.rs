//! Application error taxonomy
//!
//! Every handler returns `Result<T, AppError>`; the variant decides the HTTP
//! status and the body is a short `{"detail": ...}` text, the same shape the
//! front end already expects.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced to API callers.
#[derive(Debug, Error)]
pub enum AppError {
    /// The catalog store is not configured or could not be reached.
    #[error("{0}")]
    StoreUnavailable(String),

    /// Caller input failed a basic shape check.
    #[error("{0}")]
    InvalidRequest(String),

    /// None of the requested entities exist.
    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    /// The error returned whenever a write path runs without a store.
    pub fn store_not_configured() -> Self {
        Self::StoreUnavailable("Database not configured".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
