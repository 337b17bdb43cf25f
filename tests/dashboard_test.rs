mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{read_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn empty_database_serves_zeroed_stats() {
    let app = TestApp::new().await;

    let body = read_json(app.get("/api/v1/dashboard/stats").await).await;
    let stats = &body["data"];
    assert_eq!(stats["pendingLeaves"], 0);
    assert_eq!(stats["upcomingMeetings"], 0);
    assert_eq!(stats["activeTrainings"], 0);
    assert_eq!(stats["teamPresent"], 0);
    assert_eq!(stats["totalRooms"], 0);
    assert_eq!(stats["pendingHandovers"], 0);
    assert_eq!(stats["joinerLeaverProcesses"], 0);
    assert_eq!(stats["recentActivity"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn counters_track_each_module() {
    let app = TestApp::new().await;
    let user = app.seed_user("Sam Lee", "sam@example.com", "Employee").await;
    let asset = app.seed_asset("LT-0001", "Laptop").await;

    // Pending leave
    app.post(
        "/api/v1/operations/leave-applications",
        json!({
            "leaveType": "Annual",
            "startDate": "2026-08-10",
            "endDate": "2026-08-11",
        }),
    )
    .await;

    // Meeting within the next seven days
    let soon = (Utc::now() + Duration::days(2))
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string();
    app.post(
        "/api/v1/operations/meetings",
        json!({"title": "Standup", "meetingDate": soon}),
    )
    .await;

    // Planned training
    app.post(
        "/api/v1/operations/training",
        json!({"trainingName": "Phishing drills", "trainingType": "Security"}),
    )
    .await;

    // Present today
    let today = Utc::now().date_naive().to_string();
    app.post(
        "/api/v1/operations/attendance",
        json!({
            "userId": user["id"],
            "attendanceDate": today,
            "status": "Present",
        }),
    )
    .await;

    // Pending handover
    app.post(
        "/api/v1/handovers",
        json!({
            "employeeName": "Sam Lee",
            "employeeEmail": "sam@example.com",
            "department": "IT",
            "assets": [{
                "assetId": asset["id"],
                "assetTag": asset["asset_tag"],
                "assetType": asset["asset_type"],
            }],
        }),
    )
    .await;

    // Active joiner process
    app.post(
        "/api/v1/operations/joiner-leaver",
        json!({
            "type": "Joiner",
            "employeeName": "Nadia Haddad",
            "checklist": [{"title": "Create accounts"}],
        }),
    )
    .await;

    let body = read_json(app.get("/api/v1/dashboard/stats").await).await;
    let stats = &body["data"];
    assert_eq!(stats["pendingLeaves"], 1);
    assert_eq!(stats["upcomingMeetings"], 1);
    assert_eq!(stats["activeTrainings"], 1);
    assert_eq!(stats["teamPresent"], 1);
    assert_eq!(stats["pendingHandovers"], 1);
    assert_eq!(stats["joinerLeaverProcesses"], 1);

    // All four creations surface in the recent feed.
    let feed = stats["recentActivity"].as_array().unwrap();
    assert_eq!(feed.len(), 4);
    let kinds: Vec<&str> = feed.iter().map(|f| f["type"].as_str().unwrap()).collect();
    assert!(kinds.contains(&"leave"));
    assert!(kinds.contains(&"training"));
    assert!(kinds.contains(&"handover"));
    assert!(kinds.contains(&"joiner-leaver"));

    // The compact operations summary agrees with the dashboard.
    let ops = read_json(app.get("/api/v1/operations/stats").await).await;
    assert_eq!(ops["data"]["pendingLeaves"], 1);
    assert_eq!(ops["data"]["upcomingMeetings"], 1);
    assert_eq!(ops["data"]["activeTrainings"], 1);
    assert_eq!(ops["data"]["teamPresent"], 1);
}

#[tokio::test]
async fn status_and_health_endpoints_answer() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/status").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["service"], "itops-api");

    let response = app.get("/api/v1/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["checks"]["database"], "healthy");
}
