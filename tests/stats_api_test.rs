//! HTTP-level tests for the stats endpoints, driven in-process over the
//! in-memory record store. No database required.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use regdash::db::{FailPoint, MemoryStore};
use regdash::models::registration::{MemberType, PaymentStatus, RegistrationRecord};
use regdash::models::sport_registration::{SportRegistrationRecord, TshirtSize};
use regdash::{routes, AppState};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

fn ts(d: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, h, m, s).unwrap()
}

fn user(name: &str, member_type: MemberType, payment_status: PaymentStatus, created_at: DateTime<Utc>) -> RegistrationRecord {
    RegistrationRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        mobile: Some("9876543210".to_string()),
        address: None,
        member_type,
        payment_status,
        member_id: None,
        created_at,
    }
}

fn sport(
    name: &str,
    sports: Option<&[&str]>,
    payment_status: PaymentStatus,
    created_at: DateTime<Utc>,
) -> SportRegistrationRecord {
    SportRegistrationRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        mobile: None,
        address: None,
        age: 41,
        gender: "Female".to_string(),
        tshirt_size: TshirtSize::Small,
        selected_sports: sports.map(|s| s.iter().map(|x| x.to_string()).collect()),
        member_type: MemberType::IdaMember,
        payment_status,
        member_id: Some("IDA-0042".to_string()),
        created_at,
    }
}

fn sample_store() -> MemoryStore {
    MemoryStore::new(
        vec![
            user("Asha", MemberType::IdaMember, PaymentStatus::Success, ts(9, 10, 0, 0)),
            user("Bram", MemberType::NonMember, PaymentStatus::Pending, ts(10, 23, 59, 59)),
            user("Cleo", MemberType::IdaMember, PaymentStatus::Success, ts(11, 0, 0, 1)),
        ],
        vec![
            sport("Dev", Some(&["Tennis", "Chess"]), PaymentStatus::Success, ts(10, 8, 0, 0)),
            sport("Esi", Some(&["Chess"]), PaymentStatus::Pending, ts(11, 9, 0, 0)),
            sport("Fay", None, PaymentStatus::Success, ts(12, 9, 0, 0)),
        ],
    )
}

fn app(store: MemoryStore) -> Router {
    routes::router(AppState::new(store))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn names(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn stats_without_filters_returns_everything() {
    let (status, body) = get_json(app(sample_store()), "/api/admin/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalUsers"], 3);
    assert_eq!(body["totalSportRegistrations"], 3);
    assert_eq!(names(&body["users"]), vec!["Cleo", "Bram", "Asha"]);
    assert_eq!(names(&body["sportRegistrations"]), vec!["Fay", "Esi", "Dev"]);
    assert_eq!(body["users"][0]["paymentStatus"], "success");
    assert_eq!(body["users"][0]["memberType"], "IDA_MEMBER");
}

#[tokio::test]
async fn paid_filter_never_returns_pending_records() {
    let (status, body) = get_json(app(sample_store()), "/api/admin/stats?paymentStatus=PAID").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body["users"]), vec!["Cleo", "Asha"]);
    assert_eq!(names(&body["sportRegistrations"]), vec!["Fay", "Dev"]);
    for record in body["users"]
        .as_array()
        .unwrap()
        .iter()
        .chain(body["sportRegistrations"].as_array().unwrap())
    {
        assert_eq!(record["paymentStatus"], "success");
    }
}

#[tokio::test]
async fn same_day_range_covers_the_whole_day() {
    let (_, body) = get_json(
        app(sample_store()),
        "/api/admin/stats?startDate=2024-01-10&endDate=2024-01-10",
    )
    .await;
    assert_eq!(names(&body["users"]), vec!["Bram"]);
    assert_eq!(names(&body["sportRegistrations"]), vec!["Dev"]);
}

#[tokio::test]
async fn one_sided_date_range_does_not_filter() {
    let (_, only_start) = get_json(app(sample_store()), "/api/admin/stats?startDate=2024-01-11").await;
    let (_, only_end) = get_json(app(sample_store()), "/api/admin/stats?endDate=2024-01-09").await;
    assert_eq!(only_start["totalUsers"], 3);
    assert_eq!(only_end["totalUsers"], 3);
    assert_eq!(only_start["totalSportRegistrations"], 3);
}

#[tokio::test]
async fn unrecognized_values_are_ignored() {
    let (_, unknown) = get_json(
        app(sample_store()),
        "/api/admin/stats?memberType=NON_MEMBER&paymentStatus=REFUNDED",
    )
    .await;
    let (_, absent) = get_json(app(sample_store()), "/api/admin/stats?memberType=NON_MEMBER").await;
    assert_eq!(unknown["users"], absent["users"]);
    assert_eq!(unknown["sportRegistrations"], absent["sportRegistrations"]);
    assert_eq!(unknown["totalUsers"], 1);
}

#[tokio::test]
async fn repeated_parameters_use_the_first_value() {
    let (status, body) = get_json(
        app(sample_store()),
        "/api/admin/stats?paymentStatus=PAID&paymentStatus=PENDING",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body["users"]), vec!["Cleo", "Asha"]);
    assert_eq!(names(&body["sportRegistrations"]), vec!["Fay", "Dev"]);

    let (status, body) = get_json(
        app(sample_store()),
        "/api/admin/stats/charts?memberType=NON_MEMBER&memberType=IDA_MEMBER",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["memberTypeDistribution"]["NON_MEMBER"], 1);
    assert!(body["memberTypeDistribution"].get("IDA_MEMBER").is_none());
}

#[tokio::test]
async fn empty_parameters_are_ignored() {
    let (_, body) = get_json(
        app(sample_store()),
        "/api/admin/stats?memberType=&paymentStatus=&startDate=&endDate=",
    )
    .await;
    assert_eq!(body["totalUsers"], 3);
    assert_eq!(body["totalSportRegistrations"], 3);
}

#[tokio::test]
async fn store_failure_returns_error_body() {
    let store = sample_store().failing_at(FailPoint::Users, "connection reset by peer");
    let (status, body) = get_json(app(store.clone()), "/api/admin/stats").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch stats");
    assert_eq!(
        body["details"],
        "failed to load user records: store unavailable: connection reset by peer"
    );
    assert_eq!(store.open_sessions(), 0);
}

#[tokio::test]
async fn charts_aggregate_filtered_rows() {
    let (status, body) = get_json(app(sample_store()), "/api/admin/stats/charts").await;
    assert_eq!(status, StatusCode::OK);

    let daily = body["dailyRegistrations"].as_array().unwrap();
    let dates: Vec<&str> = daily.iter().map(|d| d["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2024-01-09", "2024-01-10", "2024-01-11", "2024-01-12"]);
    assert_eq!(daily[1]["generalCount"], 1);
    assert_eq!(daily[1]["sportCount"], 1);
    assert_eq!(daily[3]["generalCount"], 0);

    assert_eq!(body["sportDistribution"]["Tennis"], 1);
    assert_eq!(body["sportDistribution"]["Chess"], 2);

    assert_eq!(body["paymentStatusDistribution"]["Paid"], 4);
    assert_eq!(body["paymentStatusDistribution"]["Pending"], 2);

    assert_eq!(body["memberTypeDistribution"]["IDA_MEMBER"], 2);
    assert_eq!(body["memberTypeDistribution"]["NON_MEMBER"], 1);
}

#[tokio::test]
async fn charts_respect_filters() {
    let (_, body) = get_json(app(sample_store()), "/api/admin/stats/charts?paymentStatus=PENDING").await;
    assert_eq!(body["paymentStatusDistribution"]["Pending"], 2);
    assert!(body["paymentStatusDistribution"].get("Paid").is_none());
    assert_eq!(body["sportDistribution"]["Chess"], 1);
    assert!(body["sportDistribution"].get("Tennis").is_none());
}

#[tokio::test]
async fn charts_report_store_failure() {
    let store = sample_store().failing_at(FailPoint::Acquire, "pool timed out");
    let (status, body) = get_json(app(store), "/api/admin/stats/charts").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch stats");
}

#[tokio::test]
async fn readiness_reflects_store_health() {
    let (status, body) = get_json(app(sample_store()), "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");

    let failing = sample_store().failing_at(FailPoint::Acquire, "down");
    let (status, body) = get_json(app(failing), "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn liveness_is_plain_ok() {
    let response = app(sample_store())
        .oneshot(Request::builder().uri("/health/live").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let (status, body) = get_json(app(sample_store()), "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["details"], "/metrics");
}
