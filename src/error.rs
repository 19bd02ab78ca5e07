//! # error
//!
//! Centralised HTTP error type.
//!
//! Every handler returns `Result<_, AppError>`. The `IntoResponse` impl turns
//! these into `{"ok": false, "error": "..."}` bodies so the dashboard always
//! gets a machine-readable response, even on failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// The request was well-formed but its values are unusable.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested service does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Seed and live data disagree. Not expected in normal operation.
    #[error("Invariant violation: {0}")]
    Invariant(String),

    /// Catch-all for unexpected failures.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id)           => AppError::NotFound(format!("service '{id}' not found")),
            StoreError::InvalidMargin(_)       => AppError::BadRequest(err.to_string()),
            StoreError::InvariantViolation(_)  => AppError::Invariant(err.to_string()),
            StoreError::InvalidSeed(_) |
            StoreError::Pricing(_)             => AppError::Internal(anyhow::Error::new(err)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg)   => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Invariant(msg)  => {
                error!(%msg, "⛔ Store invariant violated");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {err}"),
            ),
        };

        let body = Json(json!({
            "ok":    false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
