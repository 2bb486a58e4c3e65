//! Chart aggregations derived from fetched registration rows.
//!
//! Everything here is pure and deterministic: no store access and no state kept
//! between calls. Calendar days are taken in UTC.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::registration::{MemberType, PaymentStatus, Registration, RegistrationRecord};
use crate::models::sport_registration::SportRegistrationRecord;

/// Registration counts for one calendar day.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRegistrations {
    pub date: NaiveDate,
    pub general_count: usize,
    pub sport_count: usize,
}

/// Display label for a stored payment status.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum PaymentLabel {
    Paid,
    Pending,
}

impl From<PaymentStatus> for PaymentLabel {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Success => Self::Paid,
            _ => Self::Pending,
        }
    }
}

/// All chart series for the dashboard, as returned by `GET /api/admin/stats/charts`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub daily_registrations: Vec<DailyRegistrations>,
    pub sport_distribution: BTreeMap<String, usize>,
    pub payment_status_distribution: BTreeMap<PaymentLabel, usize>,
    pub member_type_distribution: BTreeMap<MemberType, usize>,
}

impl ChartData {
    pub fn from_records(
        users: &[RegistrationRecord],
        sport_registrations: &[SportRegistrationRecord],
    ) -> Self {
        Self {
            daily_registrations: daily_registrations(users, sport_registrations),
            sport_distribution: sport_distribution(sport_registrations),
            payment_status_distribution: payment_status_distribution(users, sport_registrations),
            member_type_distribution: member_type_distribution(users),
        }
    }
}

fn counts_by_day<R: Registration>(records: &[R]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.created_at().date_naive()).or_insert(0) += 1;
    }
    counts
}

/// Per-day counts for both collections over the union of days seen, ascending.
pub fn daily_registrations(
    users: &[RegistrationRecord],
    sport_registrations: &[SportRegistrationRecord],
) -> Vec<DailyRegistrations> {
    let general = counts_by_day(users);
    let sport = counts_by_day(sport_registrations);

    let mut days: Vec<NaiveDate> = general.keys().chain(sport.keys()).copied().collect();
    days.sort_unstable();
    days.dedup();

    days.into_iter()
        .map(|date| DailyRegistrations {
            date,
            general_count: general.get(&date).copied().unwrap_or(0),
            sport_count: sport.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Occurrences of each sport across all selections. Records without a
/// selection are skipped.
pub fn sport_distribution(sport_registrations: &[SportRegistrationRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for sport in sport_registrations
        .iter()
        .filter_map(|r| r.selected_sports.as_ref())
        .flatten()
    {
        *counts.entry(sport.clone()).or_insert(0) += 1;
    }
    counts
}

/// Paid/Pending counts over general and sport registrations together.
pub fn payment_status_distribution(
    users: &[RegistrationRecord],
    sport_registrations: &[SportRegistrationRecord],
) -> BTreeMap<PaymentLabel, usize> {
    let statuses = users
        .iter()
        .map(Registration::payment_status)
        .chain(sport_registrations.iter().map(Registration::payment_status));

    let mut counts = BTreeMap::new();
    for status in statuses {
        *counts.entry(PaymentLabel::from(status)).or_insert(0) += 1;
    }
    counts
}

pub fn member_type_distribution(users: &[RegistrationRecord]) -> BTreeMap<MemberType, usize> {
    let mut counts = BTreeMap::new();
    for user in users {
        *counts.entry(user.member_type).or_insert(0) += 1;
    }
    counts
}
