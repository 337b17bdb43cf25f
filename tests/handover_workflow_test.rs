mod common;

use axum::http::{Method, StatusCode};
use common::{read_json, TestApp};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::{json, Value};

use itops_api::entities::{notification, system_log};

const IT_ADMIN: &str = "it-admin@company.com";

async fn create_handover(app: &TestApp, manager_email: Option<&str>, assets: Vec<Value>) -> Value {
    let mut body = json!({
        "employeeName": "Sam Lee",
        "employeeEmail": "sam@example.com",
        "employeeId": "E-100",
        "department": "Finance",
        "position": "Analyst",
        "handoverDate": "2026-08-03",
        "handoverType": "New Equipment",
        "assets": assets,
    });
    if let Some(email) = manager_email {
        body["manager"] = json!("Alex Kim");
        body["managerEmail"] = json!(email);
    }

    let response = app.post("/api/v1/handovers", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["data"].clone()
}

fn line_item(asset: &Value) -> Value {
    json!({
        "assetId": asset["id"],
        "assetTag": asset["asset_tag"],
        "assetType": asset["asset_type"],
        "brand": asset["brand"],
        "condition": asset["condition"],
    })
}

async fn decide(
    app: &TestApp,
    handover_id: &str,
    approver: &str,
    action: &str,
    comments: Option<&str>,
) -> axum::response::Response {
    let mut body = json!({
        "action": action,
        "approverEmail": approver,
    });
    if let Some(comments) = comments {
        body["comments"] = json!(comments);
    }
    app.post(&format!("/api/v1/handovers/{}/approve", handover_id), body)
        .await
}

#[tokio::test]
async fn two_approver_walkthrough_reaches_approved_only_after_both_sign() {
    let app = TestApp::new().await;
    let laptop = app.seed_asset("LT-0001", "Laptop").await;
    let monitor = app.seed_asset("MN-0001", "Monitor").await;

    let created = create_handover(
        &app,
        Some("alex@example.com"),
        vec![line_item(&laptop), line_item(&monitor)],
    )
    .await;
    assert_eq!(created["status"], "Pending Approval");
    let id = created["id"].as_str().unwrap().to_string();

    // Manager approves first: the handover must stay pending.
    let response = decide(&app, &id, "alex@example.com", "approve", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["status"], "Pending Approval");
    assert_eq!(
        body["data"]["message"],
        "Approval recorded. Waiting for additional approvals."
    );

    // No asset may flip before full approval.
    let available = read_json(app.get("/api/v1/assets/available").await).await;
    assert_eq!(available["data"].as_array().unwrap().len(), 2);

    // IT admin completes the chain.
    let response = decide(&app, &id, IT_ADMIN, "approve", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["status"], "Approved");
    assert_eq!(body["data"]["handoverNumber"], created["handoverNumber"]);

    // Both assets are now assigned to the employee.
    let available = read_json(app.get("/api/v1/assets/available").await).await;
    assert_eq!(available["data"].as_array().unwrap().len(), 0);

    let detail = read_json(app.get(&format!("/api/v1/handovers/{}", id)).await).await;
    assert_eq!(detail["data"]["status"], "Approved");
    assert_eq!(detail["data"]["approved_by"], IT_ADMIN);
    let approvals = detail["data"]["approvals"].as_array().unwrap();
    assert_eq!(approvals.len(), 2);
    assert!(approvals.iter().all(|a| a["status"] == "Approved"));
}

#[tokio::test]
async fn single_rejection_is_terminal_and_leaves_assets_untouched() {
    let app = TestApp::new().await;
    let laptop = app.seed_asset("LT-0002", "Laptop").await;

    // No manager named: the chain is the IT-admin seat alone.
    let created = create_handover(&app, None, vec![line_item(&laptop)]).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = decide(&app, &id, IT_ADMIN, "reject", Some("budget")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["status"], "Rejected");
    assert_eq!(body["data"]["rejectionReason"], "budget");

    let detail = read_json(app.get(&format!("/api/v1/handovers/{}", id)).await).await;
    assert_eq!(detail["data"]["status"], "Rejected");
    assert_eq!(detail["data"]["rejection_reason"], "budget");

    // The asset never left the available pool.
    let available = read_json(app.get("/api/v1/assets/available").await).await;
    assert_eq!(available["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rejection_with_manager_chain_skips_remaining_approvals() {
    let app = TestApp::new().await;
    let laptop = app.seed_asset("LT-0003", "Laptop").await;

    let created = create_handover(&app, Some("alex@example.com"), vec![line_item(&laptop)]).await;
    let id = created["id"].as_str().unwrap().to_string();

    // The manager rejects immediately; the IT-admin seat is never consulted.
    let response = decide(&app, &id, "alex@example.com", "reject", Some("not needed")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["status"], "Rejected");

    let detail = read_json(app.get(&format!("/api/v1/handovers/{}", id)).await).await;
    assert_eq!(detail["data"]["status"], "Rejected");
}

#[tokio::test]
async fn deciding_an_already_processed_approval_is_not_found() {
    let app = TestApp::new().await;
    let laptop = app.seed_asset("LT-0004", "Laptop").await;

    let created = create_handover(&app, Some("alex@example.com"), vec![line_item(&laptop)]).await;
    let id = created["id"].as_str().unwrap().to_string();

    let first = decide(&app, &id, "alex@example.com", "approve", None).await;
    assert_eq!(first.status(), StatusCode::OK);

    // The same approver cannot decide twice.
    let second = decide(&app, &id, "alex@example.com", "approve", None).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    // And the double call must not have completed the handover.
    let detail = read_json(app.get(&format!("/api/v1/handovers/{}", id)).await).await;
    assert_eq!(detail["data"]["status"], "Pending Approval");
}

#[tokio::test]
async fn unknown_approver_and_unknown_handover_are_not_found() {
    let app = TestApp::new().await;
    let laptop = app.seed_asset("LT-0005", "Laptop").await;

    let created = create_handover(&app, None, vec![line_item(&laptop)]).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = decide(&app, &id, "stranger@example.com", "approve", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let missing = uuid::Uuid::new_v4().to_string();
    let response = decide(&app, &missing, IT_ADMIN, "approve", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get(&format!("/api/v1/handovers/{}", missing)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn intake_validation_rejects_incomplete_requests() {
    let app = TestApp::new().await;
    let laptop = app.seed_asset("LT-0006", "Laptop").await;

    // Missing employee fields
    let response = app
        .post(
            "/api/v1/handovers",
            json!({
                "department": "Finance",
                "assets": [line_item(&laptop)],
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Empty asset list
    let response = app
        .post(
            "/api/v1/handovers",
            json!({
                "employeeName": "Sam Lee",
                "employeeEmail": "sam@example.com",
                "department": "Finance",
                "assets": [],
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn decision_validation_rejects_bad_payloads() {
    let app = TestApp::new().await;
    let laptop = app.seed_asset("LT-0007", "Laptop").await;

    let created = create_handover(&app, None, vec![line_item(&laptop)]).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Missing approverEmail
    let response = app
        .post(
            &format!("/api/v1/handovers/{}/approve", id),
            json!({"action": "approve"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown verb
    let response = decide(&app, &id, IT_ADMIN, "escalate", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn handover_number_is_human_readable_and_unique_per_request() {
    let app = TestApp::new().await;
    let laptop = app.seed_asset("LT-0008", "Laptop").await;
    let monitor = app.seed_asset("MN-0002", "Monitor").await;

    let first = create_handover(&app, None, vec![line_item(&laptop)]).await;
    let second = create_handover(&app, None, vec![line_item(&monitor)]).await;

    for created in [&first, &second] {
        let number = created["handoverNumber"].as_str().unwrap();
        assert_eq!(number.len(), 10, "unexpected number: {}", number);
        assert!(number.starts_with("HO"));
        assert!(number[2..].chars().all(|c| c.is_ascii_digit()));
    }
    assert_ne!(first["handoverNumber"], second["handoverNumber"]);
}

#[tokio::test]
async fn list_returns_newest_first_with_embedded_children() {
    let app = TestApp::new().await;
    let laptop = app.seed_asset("LT-0009", "Laptop").await;
    let monitor = app.seed_asset("MN-0003", "Monitor").await;

    let first = create_handover(&app, None, vec![line_item(&laptop)]).await;
    let second = create_handover(&app, Some("alex@example.com"), vec![line_item(&monitor)]).await;

    let listed = read_json(app.get("/api/v1/handovers").await).await;
    let items = listed["data"].as_array().unwrap().clone();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["handover_number"], second["handoverNumber"]);
    assert_eq!(items[1]["handover_number"], first["handoverNumber"]);

    // Children ride along: one asset each, chain length depends on manager.
    assert_eq!(items[0]["assets"].as_array().unwrap().len(), 1);
    assert_eq!(items[0]["approvals"].as_array().unwrap().len(), 2);
    assert_eq!(items[1]["approvals"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn workflow_writes_notifications_and_audit_trail() {
    let app = TestApp::new().await;
    let laptop = app.seed_asset("LT-0010", "Laptop").await;

    let created = create_handover(&app, Some("alex@example.com"), vec![line_item(&laptop)]).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Intake: one email per approver plus the employee confirmation.
    let db = app.state.db.as_ref();
    let sent = notification::Entity::find().all(db).await.unwrap();
    assert_eq!(sent.len(), 3);
    assert!(sent
        .iter()
        .any(|n| n.recipient_email == "alex@example.com" && n.kind == "approval_request"));
    assert!(sent
        .iter()
        .any(|n| n.recipient_email == "sam@example.com" && n.kind == "handover_created"));

    decide(&app, &id, "alex@example.com", "approve", None).await;
    decide(&app, &id, IT_ADMIN, "approve", None).await;

    // Full approval notifies the employee exactly once more.
    let sent = notification::Entity::find()
        .filter(notification::Column::Kind.eq("handover_approved"))
        .all(db)
        .await
        .unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient_email, "sam@example.com");

    let actions: Vec<String> = system_log::Entity::find()
        .all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.action)
        .collect();
    assert!(actions.contains(&"HANDOVER_CREATED".to_string()));
    assert!(actions.contains(&"HANDOVER_PARTIAL_APPROVAL".to_string()));
    assert!(actions.contains(&"HANDOVER_APPROVED".to_string()));
}

#[tokio::test]
async fn method_probe_returns_not_found_for_unknown_routes() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::GET, "/api/v1/handovers/not-a-uuid/approve", None)
        .await;
    // Route exists only for POST; GET falls through to the router's 404/405.
    assert_ne!(response.status(), StatusCode::OK);
}
