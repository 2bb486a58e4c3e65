pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use db::PgStore;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState<S = PgStore> {
    pub store: S,
}

impl<S> AppState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}
