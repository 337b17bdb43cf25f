use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    commands::handovers::{
        CreateHandoverCommand, DecideHandoverCommand, HandoverAssetInput, HandoverDecision,
    },
    errors::ServiceError,
    services::handovers::HandoverDetails,
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_handovers).post(create_handover))
        .route("/:id", get(get_handover))
        .route("/:id/approve", post(decide_handover))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetLineRequest {
    pub asset_id: Uuid,
    pub asset_tag: String,
    pub asset_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub condition: Option<String>,
    pub accessories: Option<String>,
    pub notes: Option<String>,
}

/// Intake payload. Required-ness is enforced in the workflow command so a
/// missing field surfaces as a 400 with a message rather than a
/// deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHandoverRequest {
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub employee_email: Option<String>,
    pub employee_id: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub position: Option<String>,
    pub manager: Option<String>,
    pub manager_email: Option<String>,
    pub handover_date: Option<NaiveDate>,
    pub handover_type: Option<String>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub assets: Vec<AssetLineRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHandoverResponse {
    pub handover_number: String,
    pub id: Uuid,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandoverDecisionRequest {
    #[serde(default)]
    pub action: Option<String>,
    pub comments: Option<String>,
    #[serde(default)]
    pub approver_email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandoverDecisionResponse {
    pub message: String,
    pub status: String,
    pub handover_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// All handovers, newest first, with line-items and approvals embedded.
#[utoipa::path(
    get,
    path = "/api/v1/handovers",
    tag = "Handovers",
    responses(
        (status = 200, description = "Handover list")
    )
)]
pub async fn list_handovers(State(state): State<AppState>) -> ApiResult<Vec<HandoverDetails>> {
    let handovers = state.services.handovers.list_handovers().await?;
    Ok(Json(ApiResponse::success(handovers)))
}

#[utoipa::path(
    get,
    path = "/api/v1/handovers/{id}",
    tag = "Handovers",
    params(("id" = Uuid, Path, description = "Handover id")),
    responses(
        (status = 200, description = "Handover with line-items and approvals"),
        (status = 404, description = "Handover not found")
    )
)]
pub async fn get_handover(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<HandoverDetails> {
    match state.services.handovers.get_handover(id).await? {
        Some(details) => Ok(Json(ApiResponse::success(details))),
        None => Err(ServiceError::NotFound("Handover not found".to_string())),
    }
}

/// Intake: create the handover, build the approval chain, and notify.
#[utoipa::path(
    post,
    path = "/api/v1/handovers",
    tag = "Handovers",
    request_body = CreateHandoverRequest,
    responses(
        (status = 201, description = "Handover created and submitted for approval"),
        (status = 400, description = "Missing required fields")
    )
)]
pub async fn create_handover(
    State(state): State<AppState>,
    Json(payload): Json<CreateHandoverRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreateHandoverResponse>>), ServiceError> {
    let handover_date = payload
        .handover_date
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_else(|| Utc::now().naive_utc());

    let command = CreateHandoverCommand {
        employee_name: payload.employee_name.unwrap_or_default(),
        employee_email: payload.employee_email.unwrap_or_default(),
        employee_id: payload.employee_id,
        department: payload.department.unwrap_or_default(),
        position: payload.position,
        manager: payload.manager,
        manager_email: payload.manager_email,
        handover_date,
        handover_type: payload
            .handover_type
            .unwrap_or_else(|| "Equipment Handover".to_string()),
        purpose: payload.purpose,
        notes: payload.notes,
        submitted_by: "system".to_string(),
        assets: payload
            .assets
            .into_iter()
            .map(|asset| HandoverAssetInput {
                asset_id: asset.asset_id,
                asset_tag: asset.asset_tag,
                asset_type: asset.asset_type,
                brand: asset.brand,
                model: asset.model,
                serial_number: asset.serial_number,
                condition: asset.condition,
                accessories: asset.accessories,
                notes: asset.notes,
            })
            .collect(),
        it_admin_email: state.config.it_admin_email.clone(),
    };

    let created = state.services.handovers.create_handover(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreateHandoverResponse {
            handover_number: created.handover_number,
            id: created.id,
            status: created.status,
            message: "Handover created successfully and approval notifications sent".to_string(),
        })),
    ))
}

/// Record one approver's decision and advance the workflow.
#[utoipa::path(
    post,
    path = "/api/v1/handovers/{id}/approve",
    tag = "Handovers",
    params(("id" = Uuid, Path, description = "Handover id")),
    request_body = HandoverDecisionRequest,
    responses(
        (status = 200, description = "Decision recorded"),
        (status = 400, description = "Missing or invalid action"),
        (status = 404, description = "Handover or pending approval not found")
    )
)]
pub async fn decide_handover(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<HandoverDecisionRequest>,
) -> ApiResult<HandoverDecisionResponse> {
    let (Some(action), Some(approver_email)) = (payload.action, payload.approver_email) else {
        return Err(ServiceError::ValidationError(
            "Missing required fields: action and approverEmail".to_string(),
        ));
    };

    let decision: HandoverDecision = action.parse()?;

    let command = DecideHandoverCommand {
        handover_id: id,
        approver_email,
        decision,
        comments: payload.comments,
    };

    let result = state.services.handovers.decide_handover(command).await?;

    Ok(Json(ApiResponse::success(HandoverDecisionResponse {
        message: result.message,
        status: result.status,
        handover_number: result.handover_number,
        rejection_reason: result.rejection_reason,
    })))
}
