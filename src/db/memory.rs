//! In-memory record store.
//!
//! Holds a fixed set of records and evaluates predicates directly. Used by the
//! test suites and for running the API without a database. Failures can be
//! injected at a chosen point, and open sessions are counted so callers can
//! check that every session is released.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::db::store::{RecordSession, RecordStore, StoreError};
use crate::models::predicate::{Predicate, SortOrder};
use crate::models::registration::RegistrationRecord;
use crate::models::sport_registration::SportRegistrationRecord;

/// Where an injected failure fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Acquire,
    Users,
    SportRegistrations,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<Vec<RegistrationRecord>>,
    sport_registrations: Arc<Vec<SportRegistrationRecord>>,
    failure: Option<(FailPoint, String)>,
    open_sessions: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new(
        users: Vec<RegistrationRecord>,
        sport_registrations: Vec<SportRegistrationRecord>,
    ) -> Self {
        Self {
            users: Arc::new(users),
            sport_registrations: Arc::new(sport_registrations),
            ..Self::default()
        }
    }

    /// Make the store fail at `point` with `message`.
    pub fn failing_at(mut self, point: FailPoint, message: impl Into<String>) -> Self {
        self.failure = Some((point, message.into()));
        self
    }

    /// Number of sessions acquired and not yet dropped.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }

    fn check(&self, point: FailPoint) -> Result<(), StoreError> {
        match &self.failure {
            Some((at, message)) if *at == point => Err(StoreError::Unavailable(message.clone())),
            _ => Ok(()),
        }
    }
}

/// Session over a [`MemoryStore`]; decrements the open-session count on drop.
#[derive(Debug)]
pub struct MemorySession {
    store: MemoryStore,
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.store.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    type Session = MemorySession;

    async fn acquire(&self) -> Result<MemorySession, StoreError> {
        self.check(FailPoint::Acquire)?;
        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(MemorySession {
            store: self.clone(),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check(FailPoint::Acquire)
    }
}

#[async_trait]
impl RecordSession for MemorySession {
    async fn find_users(
        &mut self,
        predicate: &Predicate,
        order: &SortOrder,
    ) -> Result<Vec<RegistrationRecord>, StoreError> {
        self.store.check(FailPoint::Users)?;
        let mut rows: Vec<_> = self
            .store
            .users
            .iter()
            .filter(|r| predicate.matches(*r))
            .cloned()
            .collect();
        order.sort(&mut rows);
        Ok(rows)
    }

    async fn find_sport_registrations(
        &mut self,
        predicate: &Predicate,
        order: &SortOrder,
    ) -> Result<Vec<SportRegistrationRecord>, StoreError> {
        self.store.check(FailPoint::SportRegistrations)?;
        let mut rows: Vec<_> = self
            .store
            .sport_registrations
            .iter()
            .filter(|r| predicate.matches(*r))
            .cloned()
            .collect();
        order.sort(&mut rows);
        Ok(rows)
    }
}
