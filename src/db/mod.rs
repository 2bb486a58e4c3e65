//! Database connection pool and record store implementations.

pub mod memory;
pub mod postgres;
pub mod store;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use memory::{FailPoint, MemoryStore};
pub use postgres::PgStore;
pub use store::{RecordSession, RecordStore, StoreError};

/// Create a PostgreSQL connection pool.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}
