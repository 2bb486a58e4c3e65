//! Dashboard filter inputs: raw query-string values and their typed form.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::registration::{MemberType, PaymentStatus, UnknownVariant};

/// Payment status in the dashboard's filter vocabulary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentFilter {
    Paid,
    Pending,
}

impl PaymentFilter {
    /// The value stored at rest that this filter token matches.
    pub fn stored(self) -> PaymentStatus {
        match self {
            Self::Paid => PaymentStatus::Success,
            Self::Pending => PaymentStatus::Pending,
        }
    }
}

impl FromStr for PaymentFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAID" => Ok(Self::Paid),
            "PENDING" => Ok(Self::Pending),
            other => Err(UnknownVariant {
                kind: "paymentStatus",
                value: other.to_string(),
            }),
        }
    }
}

/// Query parameters of the stats endpoints, exactly as received.
#[derive(Debug, Clone, Default)]
pub struct StatsQuery {
    pub member_type: Option<String>,
    pub payment_status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Typed stats filter. Every field is optional and constrains nothing when absent.
///
/// The date bounds only apply when both are set; a lone `start_date` or
/// `end_date` is ignored rather than treated as a half-open range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterInput {
    pub member_type: Option<MemberType>,
    pub payment_status: Option<PaymentFilter>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FromIterator<(String, String)> for StatsQuery {
    /// The first occurrence of a repeated key wins. Unknown keys are skipped.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "memberType" => &mut query.member_type,
                "paymentStatus" => &mut query.payment_status,
                "startDate" => &mut query.start_date,
                "endDate" => &mut query.end_date,
                _ => continue,
            };
            if slot.is_some() {
                tracing::warn!(key = %key, value = %value, "Ignoring repeated query parameter");
                continue;
            }
            *slot = Some(value);
        }
        query
    }
}

impl From<StatsQuery> for FilterInput {
    /// Unrecognized or malformed values are dropped, not rejected.
    fn from(query: StatsQuery) -> Self {
        Self {
            member_type: parse_lenient(query.member_type),
            payment_status: parse_lenient(query.payment_status),
            start_date: parse_date(query.start_date, "startDate"),
            end_date: parse_date(query.end_date, "endDate"),
        }
    }
}

fn parse_lenient<T>(raw: Option<String>) -> Option<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    let raw = raw.filter(|v| !v.is_empty())?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(kind = e.kind, value = %e.value, "Ignoring unrecognized filter value");
            None
        }
    }
}

fn parse_date(raw: Option<String>, field: &'static str) -> Option<NaiveDate> {
    let raw = raw.filter(|v| !v.is_empty())?;
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(field, value = %raw, error = %e, "Ignoring malformed date filter");
            None
        }
    }
}
