mod common;

use axum::http::{Method, StatusCode};
use common::{read_json, TestApp};
use serde_json::{json, Value};

async fn create_process(app: &TestApp, checklist: Vec<Value>) -> Value {
    let response = app
        .post(
            "/api/v1/operations/joiner-leaver",
            json!({
                "type": "Joiner",
                "employeeName": "Nadia Haddad",
                "employeeId": "E-204",
                "department": "IT",
                "position": "Engineer",
                "startDate": "2026-09-01",
                "checklist": checklist,
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["data"].clone()
}

fn item(title: &str) -> Value {
    json!({"title": title, "category": "IT Setup", "isRequired": true})
}

#[tokio::test]
async fn process_is_created_with_its_checklist_in_one_shot() {
    let app = TestApp::new().await;
    let process = create_process(&app, vec![item("Create accounts"), item("Issue laptop")]).await;

    assert_eq!(process["status"], "In Progress");
    assert_eq!(process["total_items"], 2);
    assert_eq!(process["completed_items"], 0);
    assert_eq!(process["progress_percentage"], 0);

    let checklist = process["checklist"].as_array().unwrap();
    assert_eq!(checklist.len(), 2);
    assert_eq!(checklist[0]["title"], "Create accounts");
    assert_eq!(checklist[0]["sort_order"], 0);
    assert_eq!(checklist[1]["sort_order"], 1);
}

#[tokio::test]
async fn toggling_items_recomputes_progress_and_derives_status() {
    let app = TestApp::new().await;
    let process = create_process(
        &app,
        vec![item("Create accounts"), item("Issue laptop"), item("Badge")],
    )
    .await;
    let id = process["id"].as_str().unwrap().to_string();
    let first_item = process["checklist"][0]["id"].as_str().unwrap().to_string();

    // Complete one of three: 33%, still in progress.
    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/operations/joiner-leaver/{}/checklist", id),
            Some(json!({"itemId": first_item, "notes": "done on day one"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["completed_items"], 1);
    assert_eq!(body["data"]["progress_percentage"], 33);
    assert_eq!(body["data"]["status"], "In Progress");
    assert_eq!(body["data"]["checklist"][0]["notes"], "done on day one");
    assert!(body["data"]["checklist"][0]["completed_at"].is_string());

    // Complete the rest: 100% flips the process to Completed.
    for index in [1, 2] {
        let item_id = process["checklist"][index]["id"].as_str().unwrap();
        app.request(
            Method::PATCH,
            &format!("/api/v1/operations/joiner-leaver/{}/checklist", id),
            Some(json!({"itemId": item_id})),
        )
        .await;
    }
    let fetched = read_json(
        app.get(&format!("/api/v1/operations/joiner-leaver/{}", id))
            .await,
    )
    .await;
    assert_eq!(fetched["data"]["progress_percentage"], 100);
    assert_eq!(fetched["data"]["status"], "Completed");

    // Un-toggling the first item drops it back to In Progress.
    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/operations/joiner-leaver/{}/checklist", id),
            Some(json!({"itemId": first_item})),
        )
        .await;
    let body = read_json(response).await;
    assert_eq!(body["data"]["completed_items"], 2);
    assert_eq!(body["data"]["status"], "In Progress");
    assert!(body["data"]["checklist"][0]["completed_at"].is_null());
}

#[tokio::test]
async fn toggling_a_foreign_item_is_rejected() {
    let app = TestApp::new().await;
    let first = create_process(&app, vec![item("Task A")]).await;
    let second = create_process(&app, vec![item("Task B")]).await;

    let second_item = second["checklist"][0]["id"].as_str().unwrap();
    let response = app
        .request(
            Method::PATCH,
            &format!(
                "/api/v1/operations/joiner-leaver/{}/checklist",
                first["id"].as_str().unwrap()
            ),
            Some(json!({"itemId": second_item})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown item id
    let response = app
        .request(
            Method::PATCH,
            &format!(
                "/api/v1/operations/joiner-leaver/{}/checklist",
                first["id"].as_str().unwrap()
            ),
            Some(json!({"itemId": uuid::Uuid::new_v4()})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn appending_an_item_lands_after_the_tail_and_bumps_totals() {
    let app = TestApp::new().await;
    let process = create_process(&app, vec![item("Task A"), item("Task B")]).await;
    let id = process["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            &format!("/api/v1/operations/joiner-leaver/{}/checklist", id),
            json!({"title": "Security briefing", "isRequired": false}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    assert_eq!(created["data"]["sort_order"], 2);

    let fetched = read_json(
        app.get(&format!("/api/v1/operations/joiner-leaver/{}", id))
            .await,
    )
    .await;
    assert_eq!(fetched["data"]["total_items"], 3);
    let titles: Vec<&str> = fetched["data"]["checklist"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Task A", "Task B", "Security briefing"]);
}

#[tokio::test]
async fn removing_an_item_soft_deletes_and_recomputes() {
    let app = TestApp::new().await;
    let process = create_process(&app, vec![item("Task A"), item("Task B")]).await;
    let id = process["id"].as_str().unwrap().to_string();
    let first_item = process["checklist"][0]["id"].as_str().unwrap().to_string();

    // Complete the first item, then delete it: the remaining single item is
    // incomplete, so progress falls back to zero.
    app.request(
        Method::PATCH,
        &format!("/api/v1/operations/joiner-leaver/{}/checklist", id),
        Some(json!({"itemId": first_item})),
    )
    .await;

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/operations/joiner-leaver/{}/checklist", id),
            Some(json!({"itemId": first_item})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["total_items"], 1);
    assert_eq!(body["data"]["completed_items"], 0);
    assert_eq!(body["data"]["progress_percentage"], 0);
    assert_eq!(body["data"]["checklist"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn process_update_and_soft_delete() {
    let app = TestApp::new().await;
    let process = create_process(&app, vec![item("Task A")]).await;
    let id = process["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/operations/joiner-leaver/{}", id),
            Some(json!({"department": "Security", "notes": "Fast-tracked"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["department"], "Security");
    assert_eq!(body["data"]["notes"], "Fast-tracked");
    assert_eq!(body["data"]["employee_name"], "Nadia Haddad");

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/operations/joiner-leaver/{}", id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Soft-deleted: gone from reads and the list.
    let response = app
        .get(&format!("/api/v1/operations/joiner-leaver/{}", id))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let listed = read_json(app.get("/api/v1/operations/joiner-leaver").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn process_creation_requires_type_and_employee_name() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/api/v1/operations/joiner-leaver",
            json!({"employeeName": "Nadia Haddad"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
