mod common;

use axum::http::StatusCode;
use common::{read_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn otp_round_trip_authenticates_and_issues_a_token() {
    let app = TestApp::new().await;
    app.seed_user("Dana Ops", "dana@example.com", "Manager").await;

    let response = app
        .post("/api/v1/auth/send-otp", json!({"email": "dana@example.com"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["message"], "OTP sent successfully");
    assert_eq!(body["data"]["user"]["role"], "Manager");
    let code = body["data"]["testOtp"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);

    let response = app
        .post(
            "/api/v1/auth/verify-otp",
            json!({"email": "dana@example.com", "otp": code}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["message"], "Authentication successful");
    assert_eq!(body["data"]["user"]["email"], "dana@example.com");

    let token = body["data"]["accessToken"].as_str().unwrap();
    let claims = itops_api::auth::decode_access_token(
        token,
        "test_secret_key_for_testing_purposes_only_32chars",
    )
    .expect("issued token should verify");
    assert_eq!(claims.email, "dana@example.com");
    assert_eq!(claims.role, "Manager");
}

#[tokio::test]
async fn otp_cannot_be_replayed() {
    let app = TestApp::new().await;
    app.seed_user("Dana Ops", "dana@example.com", "Manager").await;

    let body = read_json(
        app.post("/api/v1/auth/send-otp", json!({"email": "dana@example.com"}))
            .await,
    )
    .await;
    let code = body["data"]["testOtp"].as_str().unwrap().to_string();

    let first = app
        .post(
            "/api/v1/auth/verify-otp",
            json!({"email": "dana@example.com", "otp": code}),
        )
        .await;
    assert_eq!(first.status(), StatusCode::OK);

    // The code was consumed by the first verification.
    let second = app
        .post(
            "/api/v1/auth/verify-otp",
            json!({"email": "dana@example.com", "otp": code}),
        )
        .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn send_otp_rejects_unknown_and_inactive_users() {
    let app = TestApp::new().await;

    let response = app
        .post("/api/v1/auth/send-otp", json!({"email": "ghost@example.com"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Deactivate a seeded user directly, then try again.
    app.seed_user("Gone Person", "gone@example.com", "Employee")
        .await;
    {
        use itops_api::entities::user;
        use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

        let db = app.state.db.as_ref();
        let found = user::Entity::find()
            .filter(user::Column::Email.eq("gone@example.com"))
            .one(db)
            .await
            .unwrap()
            .unwrap();
        let mut active: user::ActiveModel = found.into();
        active.active = Set(false);
        active.update(db).await.unwrap();
    }

    let response = app
        .post("/api/v1/auth/send-otp", json!({"email": "gone@example.com"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn verify_otp_rejects_malformed_codes() {
    let app = TestApp::new().await;
    app.seed_user("Dana Ops", "dana@example.com", "Manager").await;

    for bad in ["12345", "1234567", "12a456"] {
        let response = app
            .post(
                "/api/v1/auth/verify-otp",
                json!({"email": "dana@example.com", "otp": bad}),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "code {bad}");
    }
}

#[tokio::test]
async fn directory_splits_names_and_lists_active_users_sorted() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/v1/users",
            json!({
                "firstName": "Maria",
                "lastName": "del Rio",
                "email": "maria@example.com",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    assert_eq!(created["data"]["firstName"], "Maria");
    assert_eq!(created["data"]["lastName"], "del Rio");
    // Defaults applied when omitted
    assert_eq!(created["data"]["department"], "IT");
    assert_eq!(created["data"]["role"], "Employee");

    app.seed_user("Alex Kim", "alex@example.com", "Manager").await;

    let listed = read_json(app.get("/api/v1/users").await).await;
    let items = listed["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    // Name-sorted: Alex before Maria
    assert_eq!(items[0]["firstName"], "Alex");
    assert_eq!(items[1]["firstName"], "Maria");
}

#[tokio::test]
async fn duplicate_email_is_a_validation_failure() {
    let app = TestApp::new().await;
    app.seed_user("Dana Ops", "dana@example.com", "Manager").await;

    let response = app
        .post(
            "/api/v1/users",
            json!({"firstName": "Dana", "email": "dana@example.com"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post(
            "/api/v1/admin/users",
            json!({"name": "Dana Again", "email": "dana@example.com"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_creation_requires_first_name_and_email() {
    let app = TestApp::new().await;

    let response = app
        .post("/api/v1/users", json!({"lastName": "Lee"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post("/api/v1/users", json!({"firstName": "Sam"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_listing_returns_full_records_newest_first() {
    let app = TestApp::new().await;
    app.seed_user("First User", "first@example.com", "Employee")
        .await;
    app.seed_user("Second User", "second@example.com", "Employee")
        .await;

    let listed = read_json(app.get("/api/v1/admin/users").await).await;
    let items = listed["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["email"], "second@example.com");
    assert_eq!(items[1]["email"], "first@example.com");
    // Full record shape, not the split-name projection
    assert!(items[0]["name"].is_string());
    assert!(items[0]["active"].as_bool().unwrap());
}
