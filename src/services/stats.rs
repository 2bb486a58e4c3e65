//! Filtered registration stats: predicate construction and the two-collection query.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::db::store::{RecordSession, RecordStore, StoreError};
use crate::models::filter::FilterInput;
use crate::models::predicate::{Clause, Field, Operator, Predicate, SortOrder, Value};
use crate::models::registration::RegistrationRecord;
use crate::models::sport_registration::SportRegistrationRecord;

/// Filtered registrations and their counts, as returned by `GET /api/admin/stats`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: usize,
    pub total_sport_registrations: usize,
    pub users: Vec<RegistrationRecord>,
    pub sport_registrations: Vec<SportRegistrationRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    SportRegistrations,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users => f.write_str("user"),
            Self::SportRegistrations => f.write_str("sport registration"),
        }
    }
}

/// The stats query failed. Callers never receive partial results.
#[derive(Debug, thiserror::Error)]
pub enum StatsQueryError {
    #[error("could not open a store session: {0}")]
    Acquire(StoreError),

    #[error("failed to load {collection} records: {cause}")]
    Fetch {
        collection: Collection,
        cause: StoreError,
    },
}

/// Inclusive calendar-day range as a half-open UTC timestamp range:
/// `[start 00:00, end + 1 day 00:00)`.
///
/// Returns `None` when the day after `end` is outside the calendar.
pub fn day_range(start: NaiveDate, end: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let upper = end.succ_opt()?;
    Some((
        start.and_time(NaiveTime::MIN).and_utc(),
        upper.and_time(NaiveTime::MIN).and_utc(),
    ))
}

/// Build the conjunctive predicate for the fields present in `filter`.
///
/// A date condition needs both bounds; one bound alone adds nothing.
pub fn build_predicate(filter: &FilterInput) -> Predicate {
    let mut predicate = Predicate::new();

    if let Some(member_type) = filter.member_type {
        predicate.push(Clause::new(
            Field::MemberType,
            Operator::Eq,
            Value::MemberType(member_type),
        ));
    }
    if let Some(payment) = filter.payment_status {
        predicate.push(Clause::new(
            Field::PaymentStatus,
            Operator::Eq,
            Value::PaymentStatus(payment.stored()),
        ));
    }
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        match day_range(start, end) {
            Some((from, until)) => {
                predicate.push(Clause::new(
                    Field::CreatedAt,
                    Operator::Gte,
                    Value::Timestamp(from),
                ));
                predicate.push(Clause::new(
                    Field::CreatedAt,
                    Operator::Lt,
                    Value::Timestamp(until),
                ));
            }
            None => {
                tracing::warn!(%start, %end, "End date has no following day, skipping date filter");
            }
        }
    }

    predicate
}

/// Fetch both registration collections matching `filter`, newest first.
///
/// One session is held for both queries and released on return, whether the
/// queries succeeded or not.
pub async fn get_stats<S: RecordStore>(
    store: &S,
    filter: &FilterInput,
) -> Result<StatsResponse, StatsQueryError> {
    let predicate = build_predicate(filter);
    let order = SortOrder::newest_first();
    tracing::debug!(clauses = predicate.len(), ?predicate, "Applying stats filter");

    let mut session = store.acquire().await.map_err(StatsQueryError::Acquire)?;

    let users = session
        .find_users(&predicate, &order)
        .await
        .map_err(|cause| StatsQueryError::Fetch {
            collection: Collection::Users,
            cause,
        })?;
    let sport_registrations = session
        .find_sport_registrations(&predicate, &order)
        .await
        .map_err(|cause| StatsQueryError::Fetch {
            collection: Collection::SportRegistrations,
            cause,
        })?;
    drop(session);

    let response = StatsResponse {
        total_users: users.len(),
        total_sport_registrations: sport_registrations.len(),
        users,
        sport_registrations,
    };
    tracing::info!(
        total_users = response.total_users,
        total_sport_registrations = response.total_sport_registrations,
        "Stats query completed"
    );
    Ok(response)
}
