//! Admin stats routes: filtered registrations and the chart series derived from them.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::db::store::RecordStore;
use crate::errors::AppError;
use crate::models::filter::{FilterInput, StatsQuery};
use crate::services::charts::ChartData;
use crate::services::stats::{self as stats_service, StatsResponse};
use crate::AppState;

/// GET /api/admin/stats: filtered registrations with counts.
pub async fn stats<S: RecordStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<StatsResponse>, AppError> {
    let filter = FilterInput::from(params.into_iter().collect::<StatsQuery>());
    let response = stats_service::get_stats(&state.store, &filter).await?;
    Ok(Json(response))
}

/// GET /api/admin/stats/charts: chart series over the filtered registrations.
pub async fn charts<S: RecordStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ChartData>, AppError> {
    let filter = FilterInput::from(params.into_iter().collect::<StatsQuery>());
    let stats = stats_service::get_stats(&state.store, &filter).await?;
    Ok(Json(ChartData::from_records(
        &stats.users,
        &stats.sport_registrations,
    )))
}
