use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entities::user,
    errors::ServiceError,
    services::users::split_name,
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_users).post(create_user))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/", get(admin_list_users).post(admin_create_user))
}

/// Directory projection with the stored name split into first/last.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub role: String,
}

impl From<user::Model> for DirectoryUser {
    fn from(model: user::Model) -> Self {
        let (first_name, last_name) = split_name(&model.name);
        Self {
            id: model.id,
            first_name,
            last_name,
            email: model.email,
            department: model.department,
            role: model.role,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminCreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
}

/// Active users sorted by name.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<DirectoryUser>> {
    let users = state.services.users.list_active().await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(DirectoryUser::from).collect(),
    )))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DirectoryUser>>), ServiceError> {
    let (Some(first_name), Some(email)) = (
        payload.first_name.filter(|v| !v.trim().is_empty()),
        payload.email.filter(|v| !v.trim().is_empty()),
    ) else {
        return Err(ServiceError::ValidationError(
            "First name and email are required".to_string(),
        ));
    };

    let name = match payload.last_name.filter(|v| !v.trim().is_empty()) {
        Some(last) => format!("{} {}", first_name, last),
        None => first_name,
    };

    let created = state
        .services
        .users
        .create_user(
            name,
            email,
            payload.role.unwrap_or_else(|| "Employee".to_string()),
            payload.department.unwrap_or_else(|| "IT".to_string()),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(DirectoryUser::from(created))),
    ))
}

/// Full user records, newest first; the admin console view.
pub async fn admin_list_users(State(state): State<AppState>) -> ApiResult<Vec<user::Model>> {
    let users = state.services.users.list_all().await?;
    Ok(Json(ApiResponse::success(users)))
}

pub async fn admin_create_user(
    State(state): State<AppState>,
    Json(payload): Json<AdminCreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<user::Model>>), ServiceError> {
    let (Some(name), Some(email)) = (
        payload.name.filter(|v| !v.trim().is_empty()),
        payload.email.filter(|v| !v.trim().is_empty()),
    ) else {
        return Err(ServiceError::ValidationError(
            "name and email are required".to_string(),
        ));
    };

    let created = state
        .services
        .users
        .create_user(
            name,
            email,
            payload.role.unwrap_or_else(|| "Employee".to_string()),
            payload.department.unwrap_or_else(|| "IT".to_string()),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}
