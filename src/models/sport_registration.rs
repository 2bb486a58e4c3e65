//! Sports-event registration model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::registration::{MemberType, PaymentStatus, Registration};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "tshirt_size")]
pub enum TshirtSize {
    #[sqlx(rename = "XS")]
    #[serde(rename = "XS")]
    ExtraSmall,
    #[sqlx(rename = "S")]
    #[serde(rename = "S")]
    Small,
    #[sqlx(rename = "M")]
    #[serde(rename = "M")]
    Medium,
    #[sqlx(rename = "L")]
    #[serde(rename = "L")]
    Large,
    #[sqlx(rename = "XL")]
    #[serde(rename = "XL")]
    ExtraLarge,
    #[sqlx(rename = "XXL")]
    #[serde(rename = "XXL")]
    DoubleExtraLarge,
}

/// A sports-event registration row.
///
/// `selected_sports` is nullable at rest; a `None` value contributes nothing to
/// the sport distribution.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SportRegistrationRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub age: i32,
    pub gender: String,
    pub tshirt_size: TshirtSize,
    pub selected_sports: Option<Vec<String>>,
    pub member_type: MemberType,
    pub payment_status: PaymentStatus,
    pub member_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Registration for SportRegistrationRecord {
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
