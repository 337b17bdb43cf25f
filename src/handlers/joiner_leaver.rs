use axum::{
    extract::{Path, State},
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
    entities::joiner_leaver_checklist_item,
    errors::ServiceError,
    services::joiner_leaver::{ChecklistItemInput, ProcessDetails, ProcessUpdate},
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_processes).post(create_process))
        .route(
            "/:id",
            get(get_process).put(update_process).delete(delete_process),
        )
        .route(
            "/:id/checklist",
            axum::routing::patch(toggle_checklist_item)
                .post(add_checklist_item)
                .delete(remove_checklist_item),
        )
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    pub document_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProcessRequest {
    #[serde(rename = "type", default)]
    pub process_type: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub manager: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItemRequest>,
}

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProcessRequest {
    pub employee_name: Option<String>,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub manager: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleChecklistItemRequest {
    #[serde(default)]
    pub item_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveChecklistItemRequest {
    #[serde(default)]
    pub item_id: Option<Uuid>,
}

fn item_input(request: ChecklistItemRequest) -> Result<ChecklistItemInput, ServiceError> {
    let title = request
        .title
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ServiceError::ValidationError("title is required".to_string()))?;
    Ok(ChecklistItemInput {
        title,
        description: request.description,
        category: request.category,
        is_required: request.is_required,
        document_url: request.document_url,
    })
}

pub async fn list_processes(State(state): State<AppState>) -> ApiResult<Vec<ProcessDetails>> {
    let processes = state.services.joiner_leaver.list().await?;
    Ok(Json(ApiResponse::success(processes)))
}

pub async fn create_process(
    State(state): State<AppState>,
    Json(payload): Json<CreateProcessRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProcessDetails>>), ServiceError> {
    let (Some(process_type), Some(employee_name)) = (
        payload.process_type.filter(|v| !v.trim().is_empty()),
        payload.employee_name.filter(|v| !v.trim().is_empty()),
    ) else {
        return Err(ServiceError::ValidationError(
            "type and employeeName are required".to_string(),
        ));
    };

    let checklist = payload
        .checklist
        .into_iter()
        .map(item_input)
        .collect::<Result<Vec<_>, _>>()?;

    let created = state
        .services
        .joiner_leaver
        .create(
            process_type,
            employee_name,
            payload.employee_id,
            payload.department,
            payload.position,
            payload.manager,
            payload.start_date,
            payload.end_date,
            checklist,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_process(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ProcessDetails> {
    let process = state.services.joiner_leaver.get(id).await?;
    Ok(Json(ApiResponse::success(process)))
}

pub async fn update_process(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProcessRequest>,
) -> ApiResult<ProcessDetails> {
    let update = ProcessUpdate {
        employee_name: payload.employee_name,
        employee_id: payload.employee_id,
        department: payload.department,
        position: payload.position,
        manager: payload.manager,
        start_date: payload.start_date,
        end_date: payload.end_date,
        status: payload.status,
        notes: payload.notes,
    };

    let updated = state.services.joiner_leaver.update(id, update).await?;
    Ok(Json(ApiResponse::success(updated)))
}

pub async fn delete_process(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    state.services.joiner_leaver.soft_delete(id).await?;
    Ok(Json(ApiResponse::success(json!({
        "message": "Process deleted successfully"
    }))))
}

/// Toggle one item's completion and return the process with recomputed
/// progress.
pub async fn toggle_checklist_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ToggleChecklistItemRequest>,
) -> ApiResult<ProcessDetails> {
    let item_id = payload
        .item_id
        .ok_or_else(|| ServiceError::ValidationError("itemId is required".to_string()))?;

    let updated = state
        .services
        .joiner_leaver
        .toggle_checklist_item(id, item_id, payload.notes, None)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

pub async fn add_checklist_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChecklistItemRequest>,
) -> Result<
    (
        StatusCode,
        Json<ApiResponse<joiner_leaver_checklist_item::Model>>,
    ),
    ServiceError,
> {
    let input = item_input(payload)?;
    let created = state
        .services
        .joiner_leaver
        .add_checklist_item(id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn remove_checklist_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RemoveChecklistItemRequest>,
) -> ApiResult<ProcessDetails> {
    let item_id = payload
        .item_id
        .ok_or_else(|| ServiceError::ValidationError("itemId is required".to_string()))?;

    let updated = state
        .services
        .joiner_leaver
        .remove_checklist_item(id, item_id)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}
