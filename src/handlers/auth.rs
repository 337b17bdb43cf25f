use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{errors::ServiceError, ApiResponse, ApiResult, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendOtpRequest {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OtpUserInfo {
    pub name: String,
    pub role: String,
    pub department: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub message: String,
    /// Development-mode echo of the issued code; a production deployment
    /// would deliver it by email instead.
    pub test_otp: String,
    pub user: OtpUserInfo,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub otp: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub message: String,
    pub user: AuthenticatedUser,
    pub access_token: String,
}

/// Issue a one-time passcode for the given address.
#[utoipa::path(
    post,
    path = "/api/v1/auth/send-otp",
    tag = "Auth",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Code issued (echoed for development)"),
        (status = 400, description = "Unknown or inactive user")
    )
)]
pub async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> ApiResult<SendOtpResponse> {
    let email = payload
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ServiceError::ValidationError("email is required".to_string()))?;

    let issued = state.services.users.send_otp(&email).await?;

    Ok(Json(ApiResponse::success(SendOtpResponse {
        message: "OTP sent successfully".to_string(),
        test_otp: issued.code,
        user: OtpUserInfo {
            name: issued.user.name,
            role: issued.user.role,
            department: issued.user.department,
        },
    })))
}

/// Exchange a valid passcode for a signed access token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/verify-otp",
    tag = "Auth",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Authentication successful"),
        (status = 400, description = "Unknown user, bad code format, or stale code")
    )
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> ApiResult<VerifyOtpResponse> {
    let (Some(email), Some(otp)) = (payload.email, payload.otp) else {
        return Err(ServiceError::ValidationError(
            "email and otp are required".to_string(),
        ));
    };

    let login = state.services.users.verify_otp(&email, &otp).await?;

    Ok(Json(ApiResponse::success(VerifyOtpResponse {
        message: "Authentication successful".to_string(),
        user: AuthenticatedUser {
            id: login.user.id,
            name: login.user.name,
            email: login.user.email,
            role: login.user.role,
            department: login.user.department,
        },
        access_token: login.access_token,
    })))
}
