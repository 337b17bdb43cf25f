use axum::{extract::State, response::Json, routing::get, routing::post, Router};

use crate::{
    entities::room,
    services::rooms::RoomImportReport,
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_rooms))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/import", post(import_rooms))
}

/// Every room, sorted by room number.
pub async fn list_rooms(State(state): State<AppState>) -> ApiResult<Vec<room::Model>> {
    let rooms = state.services.rooms.list_rooms().await?;
    Ok(Json(ApiResponse::success(rooms)))
}

/// Bulk import from a CSV body using the facilities spreadsheet headers.
/// Bad rows are collected into the report; the batch itself never aborts.
#[utoipa::path(
    post,
    path = "/api/v1/admin/rooms/import",
    tag = "Rooms",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Import report with per-row errors"),
        (status = 400, description = "Unreadable or empty CSV")
    )
)]
pub async fn import_rooms(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<RoomImportReport> {
    let report = state.services.rooms.import_csv(&body).await?;
    Ok(Json(ApiResponse::success(report)))
}
