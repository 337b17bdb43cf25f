use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    errors::ServiceError, services::meetings::MeetingDetails, ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_meetings).post(create_meeting))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meeting_date: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub minutes_content: Option<String>,
}

/// Meetings newest first with attendees and action items embedded.
pub async fn list_meetings(State(state): State<AppState>) -> ApiResult<Vec<MeetingDetails>> {
    let meetings = state.services.meetings.list().await?;
    Ok(Json(ApiResponse::success(meetings)))
}

pub async fn create_meeting(
    State(state): State<AppState>,
    Json(payload): Json<CreateMeetingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MeetingDetails>>), ServiceError> {
    let (Some(title), Some(meeting_date)) = (
        payload.title.filter(|v| !v.trim().is_empty()),
        payload.meeting_date,
    ) else {
        return Err(ServiceError::ValidationError(
            "title and meetingDate are required".to_string(),
        ));
    };

    let created = state
        .services
        .meetings
        .create(
            title,
            meeting_date,
            payload.location,
            payload.minutes_content,
            None,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}
