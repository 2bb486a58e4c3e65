//! General user registration model and the enums shared by both registration kinds.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// -- Enums matching PostgreSQL --

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[sqlx(type_name = "member_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberType {
    IdaMember,
    NonMember,
}

/// Payment status as stored at rest. The dashboard filters with the
/// `PAID`/`PENDING` vocabulary instead, see [`crate::models::filter::PaymentFilter`].
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Pending,
}

/// A filter or query token that does not name any known variant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for MemberType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDA_MEMBER" => Ok(Self::IdaMember),
            "NON_MEMBER" => Ok(Self::NonMember),
            other => Err(UnknownVariant {
                kind: "memberType",
                value: other.to_string(),
            }),
        }
    }
}

/// Fields every registration kind exposes to filtering and aggregation.
pub trait Registration {
    fn member_type(&self) -> MemberType;
    fn payment_status(&self) -> PaymentStatus;
    fn created_at(&self) -> DateTime<Utc>;
}

// -- General registration --

/// A general user registration row. Created by the intake flow, read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub member_type: MemberType,
    pub payment_status: PaymentStatus,
    pub member_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Registration for RegistrationRecord {
    fn member_type(&self) -> MemberType {
        self.member_type
    }

    fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
