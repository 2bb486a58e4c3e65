//! PostgreSQL record store backed by a sqlx connection pool.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use crate::db::store::{RecordSession, RecordStore, StoreError};
use crate::models::predicate::{Predicate, SortOrder, Value};
use crate::models::registration::RegistrationRecord;
use crate::models::sport_registration::SportRegistrationRecord;

const USER_COLUMNS: &str =
    "id, name, email, mobile, address, member_type, payment_status, member_id, created_at";

const SPORT_REGISTRATION_COLUMNS: &str = "id, name, email, mobile, address, age, gender, \
     tshirt_size, selected_sports, member_type, payment_status, member_id, created_at";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A pooled connection checked out for one request.
#[derive(Debug)]
pub struct PgSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl RecordStore for PgStore {
    type Session = PgSession;

    async fn acquire(&self) -> Result<PgSession, StoreError> {
        let conn = self.pool.acquire().await?;
        Ok(PgSession { conn })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordSession for PgSession {
    async fn find_users(
        &mut self,
        predicate: &Predicate,
        order: &SortOrder,
    ) -> Result<Vec<RegistrationRecord>, StoreError> {
        let sql = select_sql("users", USER_COLUMNS, predicate, order);
        tracing::debug!(sql = %sql, "Querying users");
        let query = bind_clauses(sqlx::query_as::<_, RegistrationRecord>(&sql), predicate);
        let rows = query.fetch_all(&mut *self.conn).await?;
        Ok(rows)
    }

    async fn find_sport_registrations(
        &mut self,
        predicate: &Predicate,
        order: &SortOrder,
    ) -> Result<Vec<SportRegistrationRecord>, StoreError> {
        let sql = select_sql(
            "sport_registrations",
            SPORT_REGISTRATION_COLUMNS,
            predicate,
            order,
        );
        tracing::debug!(sql = %sql, "Querying sport registrations");
        let query = bind_clauses(
            sqlx::query_as::<_, SportRegistrationRecord>(&sql),
            predicate,
        );
        let rows = query.fetch_all(&mut *self.conn).await?;
        Ok(rows)
    }
}

/// Render the predicate as a `WHERE` clause with positional parameters.
fn where_clause(predicate: &Predicate) -> String {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_index = 0u32;

    for clause in predicate.clauses() {
        param_index += 1;
        conditions.push(format!(
            "{} {} ${param_index}",
            clause.field.column(),
            clause.operator.sql()
        ));
    }

    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

fn select_sql(table: &str, columns: &str, predicate: &Predicate, order: &SortOrder) -> String {
    let where_clause = where_clause(predicate);
    let mut sql = format!("SELECT {columns} FROM {table}");
    if !where_clause.is_empty() {
        sql.push(' ');
        sql.push_str(&where_clause);
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(&order.sql());
    sql
}

/// Bind clause values in the same order `where_clause` numbered them.
fn bind_clauses<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    predicate: &Predicate,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for clause in predicate.clauses() {
        query = match clause.value {
            Value::MemberType(v) => query.bind(v),
            Value::PaymentStatus(v) => query.bind(v),
            Value::Timestamp(v) => query.bind(v),
        };
    }
    query
}
