//! Record store abstraction: a store hands out sessions, sessions run queries.
//!
//! A session is held for the duration of one request and released when it is
//! dropped, so every exit path of the caller gives it back.

use async_trait::async_trait;

use crate::models::predicate::{Predicate, SortOrder};
use crate::models::registration::RegistrationRecord;
use crate::models::sport_registration::SportRegistrationRecord;

/// Failure reaching or querying the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    type Session: RecordSession;

    /// Open a session. Dropping the session releases it.
    async fn acquire(&self) -> Result<Self::Session, StoreError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait RecordSession: Send {
    async fn find_users(
        &mut self,
        predicate: &Predicate,
        order: &SortOrder,
    ) -> Result<Vec<RegistrationRecord>, StoreError>;

    async fn find_sport_registrations(
        &mut self,
        predicate: &Predicate,
        order: &SortOrder,
    ) -> Result<Vec<SportRegistrationRecord>, StoreError>;
}
