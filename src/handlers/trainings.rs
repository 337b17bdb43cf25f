use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entities::training_plan,
    errors::ServiceError,
    services::trainings::TrainingPlanPatch,
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_training_plans).post(create_training_plan))
        .route(
            "/:id",
            get(get_training_plan)
                .patch(update_training_plan)
                .delete(delete_training_plan),
        )
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrainingPlanRequest {
    #[serde(default)]
    pub training_name: Option<String>,
    #[serde(default)]
    pub training_type: Option<String>,
    pub schedule_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub max_attendees: Option<i32>,
    pub remarks: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrainingPlanRequest {
    pub training_name: Option<String>,
    pub training_type: Option<String>,
    pub schedule_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub max_attendees: Option<i32>,
    pub remarks: Option<String>,
    pub status: Option<String>,
}

pub async fn list_training_plans(
    State(state): State<AppState>,
) -> ApiResult<Vec<training_plan::Model>> {
    let plans = state.services.trainings.list().await?;
    Ok(Json(ApiResponse::success(plans)))
}

pub async fn create_training_plan(
    State(state): State<AppState>,
    Json(payload): Json<CreateTrainingPlanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<training_plan::Model>>), ServiceError> {
    let (Some(training_name), Some(training_type)) = (
        payload.training_name.filter(|v| !v.trim().is_empty()),
        payload.training_type.filter(|v| !v.trim().is_empty()),
    ) else {
        return Err(ServiceError::ValidationError(
            "trainingName and trainingType are required".to_string(),
        ));
    };

    let created = state
        .services
        .trainings
        .create(
            training_name,
            training_type,
            payload.schedule_date,
            payload.cost,
            payload.max_attendees,
            payload.remarks,
            payload.status,
            "system".to_string(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_training_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<training_plan::Model> {
    let plan = state.services.trainings.get(id).await?;
    Ok(Json(ApiResponse::success(plan)))
}

pub async fn update_training_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTrainingPlanRequest>,
) -> ApiResult<training_plan::Model> {
    let patch = TrainingPlanPatch {
        training_name: payload.training_name,
        training_type: payload.training_type,
        schedule_date: payload.schedule_date,
        cost: payload.cost,
        max_attendees: payload.max_attendees,
        remarks: payload.remarks,
        status: payload.status,
    };

    let updated = state.services.trainings.update(id, patch).await?;
    Ok(Json(ApiResponse::success(updated)))
}

pub async fn delete_training_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    state.services.trainings.delete(id).await?;
    Ok(Json(ApiResponse::success(json!({
        "message": "Training plan deleted successfully"
    }))))
}
