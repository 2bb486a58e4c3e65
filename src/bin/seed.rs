//! Seed script for development: populates a fresh database with sample registrations.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env).

use chrono::{Duration, Utc};
use regdash::models::registration::{MemberType, PaymentStatus};
use regdash::models::sport_registration::TshirtSize;
use sqlx::PgPool;

const SPORTS: &[&str] = &["Tennis", "Chess", "Badminton", "Swimming", "Table Tennis", "Cricket"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== Registration Dashboard Seed Script ===");

    seed_users(&pool).await?;
    seed_sport_registrations(&pool).await?;

    println!("\n=== Seed complete! ===");

    Ok(())
}

async fn seed_users(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("[skip] {count} users already present");
        return Ok(());
    }

    let now = Utc::now();
    for i in 0..24i64 {
        let member_type = if i % 3 == 0 {
            MemberType::NonMember
        } else {
            MemberType::IdaMember
        };
        let payment_status = if i % 4 == 0 {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Success
        };
        let member_id = (member_type == MemberType::IdaMember).then(|| format!("IDA-{:04}", 1000 + i));

        sqlx::query(
            "INSERT INTO users (name, email, mobile, address, member_type, payment_status, member_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(format!("Sample User {i}"))
        .bind(format!("user{i}@example.com"))
        .bind(format!("98{:08}", 40_000 + i))
        .bind((i % 2 == 0).then(|| format!("{} Clinic Road, Mumbai", 10 + i)))
        .bind(member_type)
        .bind(payment_status)
        .bind(member_id)
        .bind(now - Duration::days(i / 2) - Duration::hours(i % 5))
        .execute(pool)
        .await?;
    }

    println!("[done] Created 24 users");
    Ok(())
}

async fn seed_sport_registrations(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sport_registrations")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("[skip] {count} sport registrations already present");
        return Ok(());
    }

    let sizes = [
        TshirtSize::Small,
        TshirtSize::Medium,
        TshirtSize::Large,
        TshirtSize::ExtraLarge,
    ];
    let now = Utc::now();
    for i in 0..16usize {
        let selected: Vec<String> = SPORTS
            .iter()
            .cycle()
            .skip(i)
            .take(1 + i % 3)
            .map(|s| s.to_string())
            .collect();
        let member_type = if i % 2 == 0 {
            MemberType::IdaMember
        } else {
            MemberType::NonMember
        };
        let payment_status = if i % 5 == 0 {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Success
        };

        sqlx::query(
            "INSERT INTO sport_registrations
                (name, email, mobile, age, gender, tshirt_size, selected_sports, member_type, payment_status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(format!("Sample Player {i}"))
        .bind(format!("player{i}@example.com"))
        .bind(format!("97{:08}", 50_000 + i))
        .bind(25 + (i as i32 * 3) % 30)
        .bind(if i % 2 == 0 { "Female" } else { "Male" })
        .bind(sizes[i % sizes.len()])
        .bind(selected)
        .bind(member_type)
        .bind(payment_status)
        .bind(now - Duration::days(i as i64 / 2))
        .execute(pool)
        .await?;
    }

    println!("[done] Created 16 sport registrations");
    Ok(())
}
