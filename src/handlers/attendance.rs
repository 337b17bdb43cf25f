use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    errors::ServiceError,
    services::attendance::{AttendancePatch, AttendanceRecord},
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendance).post(mark_attendance))
        .route(
            "/:id",
            get(get_attendance)
                .patch(update_attendance)
                .delete(delete_attendance),
        )
}

#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct AttendanceListQuery {
    /// Restrict to a single date (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub attendance_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub remarks: Option<String>,
}

/// Partial update. Omitted fields are untouched; an empty-string time
/// clears the stored value.
#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    pub status: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub remarks: Option<String>,
}

pub async fn list_attendance(
    State(state): State<AppState>,
    Query(query): Query<AttendanceListQuery>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let records = state.services.attendance.list(query.date).await?;
    Ok(Json(ApiResponse::success(records)))
}

pub async fn mark_attendance(
    State(state): State<AppState>,
    Json(payload): Json<MarkAttendanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AttendanceRecord>>), ServiceError> {
    let (Some(user_id), Some(attendance_date)) = (payload.user_id, payload.attendance_date) else {
        return Err(ServiceError::ValidationError(
            "User ID and attendance date are required".to_string(),
        ));
    };

    let created = state
        .services
        .attendance
        .mark(
            user_id,
            attendance_date,
            payload.status,
            payload.check_in_time,
            payload.check_out_time,
            payload.remarks,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<AttendanceRecord> {
    let record = state.services.attendance.get(id).await?;
    Ok(Json(ApiResponse::success(record)))
}

pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAttendanceRequest>,
) -> ApiResult<AttendanceRecord> {
    let clear_on_empty = |value: Option<String>| value.map(|v| (!v.is_empty()).then_some(v));

    let patch = AttendancePatch {
        status: payload.status,
        check_in_time: clear_on_empty(payload.check_in_time),
        check_out_time: clear_on_empty(payload.check_out_time),
        remarks: payload.remarks,
    };

    let updated = state.services.attendance.update(id, patch).await?;
    Ok(Json(ApiResponse::success(updated)))
}

pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    state.services.attendance.delete(id).await?;
    Ok(Json(ApiResponse::success(json!({
        "message": "Attendance record deleted successfully"
    }))))
}
