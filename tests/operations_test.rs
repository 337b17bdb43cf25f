mod common;

use axum::http::{Method, StatusCode};
use common::{read_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn leave_request_computes_inclusive_days_and_starts_pending() {
    let app = TestApp::new().await;
    app.seed_user("Sam Lee", "sam@example.com", "Employee").await;

    let response = app
        .post(
            "/api/v1/operations/leave-applications",
            json!({
                "leaveType": "Annual",
                "startDate": "2026-08-10",
                "endDate": "2026-08-14",
                "reason": "Family visit",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["data"]["days_count"], 5);
    assert_eq!(body["data"]["status"], "Pending");

    let listed = read_json(app.get("/api/v1/operations/leave-applications").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn leave_request_validation() {
    let app = TestApp::new().await;
    app.seed_user("Sam Lee", "sam@example.com", "Employee").await;

    // Reversed range
    let response = app
        .post(
            "/api/v1/operations/leave-applications",
            json!({
                "leaveType": "Annual",
                "startDate": "2026-08-14",
                "endDate": "2026-08-10",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Missing dates
    let response = app
        .post(
            "/api/v1/operations/leave-applications",
            json!({"leaveType": "Annual"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn leave_status_change_stamps_the_manager_approver() {
    let app = TestApp::new().await;
    app.seed_user("Sam Lee", "sam@example.com", "Employee").await;
    let manager = app.seed_user("Alex Kim", "alex@example.com", "Manager").await;

    let created = read_json(
        app.post(
            "/api/v1/operations/leave-applications",
            json!({
                "leaveType": "Sick",
                "startDate": "2026-08-10",
                "endDate": "2026-08-10",
            }),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/operations/leave-applications/{}", id),
            Some(json!({"status": "Approved"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["status"], "Approved");
    assert_eq!(body["data"]["approved_by"], manager["id"]);
    assert!(body["data"]["approval_date"].is_string());

    // Unknown leave id
    let response = app
        .request(
            Method::PATCH,
            &format!(
                "/api/v1/operations/leave-applications/{}",
                uuid::Uuid::new_v4()
            ),
            Some(json!({"status": "Approved"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn meetings_embed_attendees_and_action_items() {
    let app = TestApp::new().await;
    app.seed_user("Sam Lee", "sam@example.com", "Employee").await;

    let response = app
        .post(
            "/api/v1/operations/meetings",
            json!({
                "title": "Quarterly planning",
                "meetingDate": "2026-08-20T10:00:00",
                "location": "Room A-101",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["data"]["status"], "Draft");
    assert_eq!(body["data"]["attendees"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["action_items"].as_array().unwrap().len(), 0);

    let listed = read_json(app.get("/api/v1/operations/meetings").await).await;
    let items = listed["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Quarterly planning");
}

#[tokio::test]
async fn meeting_creation_requires_a_user_on_record() {
    let app = TestApp::new().await;
    // No users seeded: organizer fallback has nobody to pick.
    let response = app
        .post(
            "/api/v1/operations/meetings",
            json!({"title": "Kickoff", "meetingDate": "2026-08-20T10:00:00"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn training_plan_lifecycle() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/v1/operations/training",
            json!({
                "trainingName": "Incident response basics",
                "trainingType": "Security",
                "scheduleDate": "2026-09-01",
                "cost": "1500.00",
                "maxAttendees": 12,
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    assert_eq!(created["data"]["status"], "Planned");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // Partial update touches only the named fields.
    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/operations/training/{}", id),
            Some(json!({"status": "Completed", "remarks": "Went well"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["data"]["status"], "Completed");
    assert_eq!(updated["data"]["remarks"], "Went well");
    assert_eq!(updated["data"]["training_name"], "Incident response basics");

    let fetched = read_json(
        app.get(&format!("/api/v1/operations/training/{}", id))
            .await,
    )
    .await;
    assert_eq!(fetched["data"]["max_attendees"], 12);

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/operations/training/{}", id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get(&format!("/api/v1/operations/training/{}", id))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn training_plan_requires_name_and_type() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/api/v1/operations/training",
            json!({"trainingName": "Orphan"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn attendance_marking_joins_user_info_and_formats_times() {
    let app = TestApp::new().await;
    let user = app.seed_user("Sam Lee", "sam@example.com", "Employee").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            "/api/v1/operations/attendance",
            json!({
                "userId": user_id,
                "attendanceDate": "2026-08-05",
                "status": "Present",
                "checkInTime": "09:15",
                "checkOutTime": "17:45",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["data"]["userName"], "Sam Lee");
    assert_eq!(body["data"]["checkInTime"], "09:15");
    assert_eq!(body["data"]["checkOutTime"], "17:45");

    // Filter by date
    let listed = read_json(
        app.get("/api/v1/operations/attendance?date=2026-08-05")
            .await,
    )
    .await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let listed = read_json(
        app.get("/api/v1/operations/attendance?date=2026-08-06")
            .await,
    )
    .await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn attendance_is_unique_per_user_and_date() {
    let app = TestApp::new().await;
    let user = app.seed_user("Sam Lee", "sam@example.com", "Employee").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let body = json!({"userId": user_id, "attendanceDate": "2026-08-05"});
    let first = app.post("/api/v1/operations/attendance", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.post("/api/v1/operations/attendance", body).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn attendance_patch_merges_and_clears_times() {
    let app = TestApp::new().await;
    let user = app.seed_user("Sam Lee", "sam@example.com", "Employee").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let created = read_json(
        app.post(
            "/api/v1/operations/attendance",
            json!({
                "userId": user_id,
                "attendanceDate": "2026-08-05",
                "checkInTime": "09:00",
            }),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // Set checkout, clear checkin with an empty string, leave status alone.
    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/operations/attendance/{}", id),
            Some(json!({"checkInTime": "", "checkOutTime": "18:05"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(body["data"]["checkInTime"].is_null());
    assert_eq!(body["data"]["checkOutTime"], "18:05");
    assert_eq!(body["data"]["status"], "Present");

    // Bad wall-clock format is rejected.
    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/operations/attendance/{}", id),
            Some(json!({"checkOutTime": "6pm"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Delete, then reads are gone.
    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/operations/attendance/{}", id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = app
        .get(&format!("/api/v1/operations/attendance/{}", id))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn attendance_requires_user_and_date() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/api/v1/operations/attendance",
            json!({"attendanceDate": "2026-08-05"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
