use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{entities::it_asset, errors::ServiceError, ApiResponse, ApiResult, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register_asset))
        .route("/available", get(list_available_assets))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAssetRequest {
    #[serde(default)]
    pub asset_tag: Option<String>,
    #[serde(default)]
    pub asset_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub condition: Option<String>,
}

/// Assets currently available for handover, sorted by type then tag.
pub async fn list_available_assets(
    State(state): State<AppState>,
) -> ApiResult<Vec<it_asset::Model>> {
    let assets = state.services.assets.list_available().await?;
    Ok(Json(ApiResponse::success(assets)))
}

pub async fn register_asset(
    State(state): State<AppState>,
    Json(payload): Json<RegisterAssetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<it_asset::Model>>), ServiceError> {
    let (Some(asset_tag), Some(asset_type)) = (
        payload.asset_tag.filter(|v| !v.trim().is_empty()),
        payload.asset_type.filter(|v| !v.trim().is_empty()),
    ) else {
        return Err(ServiceError::ValidationError(
            "assetTag and assetType are required".to_string(),
        ));
    };

    let created = state
        .services
        .assets
        .register_asset(
            asset_tag,
            asset_type,
            payload.brand,
            payload.model,
            payload.serial_number,
            payload.condition,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}
