//! Backend-agnostic query predicate over registration records.
//!
//! A [`Predicate`] is a conjunction of `{field, operator, value}` clauses. Store
//! implementations either render it (see `db::postgres`) or evaluate it
//! directly with [`Predicate::matches`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::registration::{MemberType, PaymentStatus, Registration};

/// Record field a clause constrains.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    MemberType,
    PaymentStatus,
    CreatedAt,
}

impl Field {
    /// Column name in both registration tables.
    pub fn column(self) -> &'static str {
        match self {
            Self::MemberType => "member_type",
            Self::PaymentStatus => "payment_status",
            Self::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Gte,
    Lt,
}

impl Operator {
    pub fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gte => ">=",
            Self::Lt => "<",
        }
    }
}

/// Typed clause operand.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Value {
    MemberType(MemberType),
    PaymentStatus(PaymentStatus),
    Timestamp(DateTime<Utc>),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Clause {
    pub field: Field,
    pub operator: Operator,
    pub value: Value,
}

impl Clause {
    pub fn new(field: Field, operator: Operator, value: Value) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }

    /// Evaluate this clause against a record.
    ///
    /// A value of the wrong kind for the field never matches.
    pub fn matches<R: Registration>(&self, record: &R) -> bool {
        let actual = match self.field {
            Field::MemberType => Value::MemberType(record.member_type()),
            Field::PaymentStatus => Value::PaymentStatus(record.payment_status()),
            Field::CreatedAt => Value::Timestamp(record.created_at()),
        };
        match (actual, self.value) {
            (Value::MemberType(a), Value::MemberType(b)) => compare(self.operator, a, b),
            (Value::PaymentStatus(a), Value::PaymentStatus(b)) => compare(self.operator, a, b),
            (Value::Timestamp(a), Value::Timestamp(b)) => compare(self.operator, a, b),
            _ => false,
        }
    }
}

fn compare<T: Ord>(operator: Operator, actual: T, expected: T) -> bool {
    match operator {
        Operator::Eq => actual == expected,
        Operator::Gte => actual >= expected,
        Operator::Lt => actual < expected,
    }
}

/// Conjunction of clauses. An empty predicate matches every record.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn matches<R: Registration>(&self, record: &R) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Result ordering for a find-many call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: Field,
    pub direction: Direction,
}

impl SortOrder {
    /// Most recently created records first.
    pub fn newest_first() -> Self {
        Self {
            field: Field::CreatedAt,
            direction: Direction::Desc,
        }
    }

    pub fn sql(&self) -> String {
        let direction = match self.direction {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        };
        format!("{} {direction}", self.field.column())
    }

    /// Sort records in place. Only `created_at` ordering is meaningful; other
    /// fields keep the existing order.
    pub fn sort<R: Registration>(&self, records: &mut [R]) {
        if self.field != Field::CreatedAt {
            return;
        }
        match self.direction {
            Direction::Asc => records.sort_by_key(|r| r.created_at()),
            Direction::Desc => records.sort_by_key(|r| std::cmp::Reverse(r.created_at())),
        }
    }
}
