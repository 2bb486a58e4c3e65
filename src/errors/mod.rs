//! Unified error handling with a consistent JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::stats::StatsQueryError;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn new(error: &str, details: impl Into<String>) -> Json<Self> {
        Json(Self {
            error: error.to_string(),
            details: details.into(),
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Stats query failed: {0}")]
    Stats(#[from] StatsQueryError),
}

impl AppError {
    /// Check if this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(path) => (StatusCode::NOT_FOUND, ErrorResponse::new("Not found", path.clone())),
            AppError::Stats(e) => {
                tracing::error!(error = %e, "Error fetching stats");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Failed to fetch stats", e.to_string()),
                )
            }
        };

        (status, body).into_response()
    }
}
