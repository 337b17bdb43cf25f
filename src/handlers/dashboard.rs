use axum::{extract::State, response::Json, routing::get, Router};

use crate::{
    services::dashboard::{DashboardStats, OperationsStats},
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/stats", get(dashboard_stats))
}

pub fn operations_routes() -> Router<AppState> {
    Router::new().route("/stats", get(operations_stats))
}

/// Headline counters plus the unified recent-activity feed. Degrades to
/// zeroed stats on query failure instead of erroring.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "Dashboard",
    responses((status = 200, description = "Dashboard statistics", body = DashboardStats))
)]
pub async fn dashboard_stats(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    let stats = state.services.dashboard.stats().await;
    Ok(Json(ApiResponse::success(stats)))
}

/// Compact four-counter summary for the operations landing page.
#[utoipa::path(
    get,
    path = "/api/v1/operations/stats",
    tag = "Dashboard",
    responses((status = 200, description = "Operations statistics", body = OperationsStats))
)]
pub async fn operations_stats(State(state): State<AppState>) -> ApiResult<OperationsStats> {
    let stats = state.services.dashboard.operations_stats().await;
    Ok(Json(ApiResponse::success(stats)))
}
