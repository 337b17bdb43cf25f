use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "IT Operations API",
        version = "1.0.0",
        description = r#"
# IT Operations Administration API

Backend for IT operations administration: equipment handovers with a
multi-approver workflow, room inventory import and browsing, a user
directory with passwordless (OTP) login, and day-to-day operations records
for leave, meetings, trainings, attendance, and joiner/leaver onboarding.

## Authentication

Login is passwordless: request a one-time passcode for a known user, then
exchange it for a JWT access token.

## Error Handling

Failures use a consistent envelope with appropriate HTTP status codes:

```json
{
  "error": "Bad Request",
  "message": "Validation error: email required",
  "timestamp": "2026-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Handovers", description = "Equipment handover workflow"),
        (name = "Auth", description = "Passwordless login"),
        (name = "Rooms", description = "Room inventory"),
        (name = "Dashboard", description = "Aggregated statistics"),
        (name = "Health", description = "Health check endpoints")
    ),
    paths(
        // Handover workflow
        crate::handlers::handovers::list_handovers,
        crate::handlers::handovers::get_handover,
        crate::handlers::handovers::create_handover,
        crate::handlers::handovers::decide_handover,

        // Auth
        crate::handlers::auth::send_otp,
        crate::handlers::auth::verify_otp,

        // Rooms
        crate::handlers::rooms::import_rooms,

        // Dashboard
        crate::handlers::dashboard::dashboard_stats,
        crate::handlers::dashboard::operations_stats,
    ),
    components(
        schemas(
            // Common types
            crate::ApiResponse<serde_json::Value>,
            crate::PaginatedResponse<serde_json::Value>,
            crate::ListQuery,

            // Handover types
            crate::handlers::handovers::CreateHandoverRequest,
            crate::handlers::handovers::CreateHandoverResponse,
            crate::handlers::handovers::AssetLineRequest,
            crate::handlers::handovers::HandoverDecisionRequest,
            crate::handlers::handovers::HandoverDecisionResponse,

            // Auth types
            crate::handlers::auth::SendOtpRequest,
            crate::handlers::auth::SendOtpResponse,
            crate::handlers::auth::OtpUserInfo,
            crate::handlers::auth::VerifyOtpRequest,
            crate::handlers::auth::VerifyOtpResponse,
            crate::handlers::auth::AuthenticatedUser,

            // Rooms types
            crate::services::rooms::RoomImportReport,
            crate::services::rooms::RoomImportSummary,

            // Dashboard types
            crate::services::dashboard::DashboardStats,
            crate::services::dashboard::OperationsStats,
            crate::services::dashboard::ActivityItem,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
