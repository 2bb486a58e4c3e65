//! Route definitions for the dashboard API.

pub mod health;
pub mod stats;

use axum::{http::Uri, routing::get, Router};

use crate::db::store::RecordStore;
use crate::errors::AppError;
use crate::AppState;

/// Build the API router over any record store. Transport layers (CORS,
/// tracing, compression) are added by the caller.
pub fn router<S>(state: AppState<S>) -> Router
where
    S: RecordStore + Clone + 'static,
{
    let admin_routes = Router::new()
        .route("/admin/stats", get(stats::stats::<S>))
        .route("/admin/stats/charts", get(stats::charts::<S>));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready::<S>))
        .nest("/api", admin_routes)
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
