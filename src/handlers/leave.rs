use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entities::leave_application, errors::ServiceError, ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_leave_applications).post(create_leave_application))
        .route("/:id", patch(update_leave_status))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    #[serde(default)]
    pub leave_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLeaveStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

pub async fn list_leave_applications(
    State(state): State<AppState>,
) -> ApiResult<Vec<leave_application::Model>> {
    let leaves = state.services.leave.list().await?;
    Ok(Json(ApiResponse::success(leaves)))
}

pub async fn create_leave_application(
    State(state): State<AppState>,
    Json(payload): Json<CreateLeaveRequest>,
) -> Result<(StatusCode, Json<ApiResponse<leave_application::Model>>), ServiceError> {
    let (Some(leave_type), Some(start_date), Some(end_date)) = (
        payload.leave_type.filter(|v| !v.trim().is_empty()),
        payload.start_date,
        payload.end_date,
    ) else {
        return Err(ServiceError::ValidationError(
            "leaveType, startDate, and endDate are required".to_string(),
        ));
    };

    let created = state
        .services
        .leave
        .create(leave_type, start_date, end_date, payload.reason, None)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn update_leave_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeaveStatusRequest>,
) -> ApiResult<leave_application::Model> {
    let status = payload
        .status
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ServiceError::ValidationError("status is required".to_string()))?;

    let updated = state.services.leave.set_status(id, status).await?;
    Ok(Json(ApiResponse::success(updated)))
}
