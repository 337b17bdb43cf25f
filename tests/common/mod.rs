use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;

use itops_api::{
    config::AppConfig,
    db,
    events::{self, EventSender},
    handlers::AppServices,
    logging, AppState,
};

/// Helper harness for spinning up an application state backed by a fresh
/// SQLite database file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _db_file: tempfile::NamedTempFile,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let db_file = tempfile::NamedTempFile::new().expect("create temp database file");
        let db_url = format!("sqlite://{}?mode=rwc", db_file.path().display());

        let mut cfg = AppConfig::new(
            db_url,
            "test_secret_key_for_testing_purposes_only_32chars".to_string(),
            3600,
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(
            db_arc.clone(),
            Arc::new(event_sender.clone()),
            logging::discard_logger(),
            &cfg,
        );

        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let router = Router::new()
            .nest("/api/v1", itops_api::api_v1_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            _db_file: db_file,
            _event_task: event_task,
        }
    }

    /// Send a request against the router with an optional JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Send a raw text body (used by the CSV import endpoint).
    #[allow(dead_code)]
    pub async fn request_text(
        &self,
        method: Method,
        uri: &str,
        body: &str,
        content_type: &str,
    ) -> axum::response::Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body.to_string()))
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> axum::response::Response {
        self.request(Method::POST, uri, Some(body)).await
    }

    /// Seed one user through the admin API and return its record.
    #[allow(dead_code)]
    pub async fn seed_user(&self, name: &str, email: &str, role: &str) -> Value {
        let response = self
            .post(
                "/api/v1/admin/users",
                json!({
                    "name": name,
                    "email": email,
                    "role": role,
                    "department": "IT",
                }),
            )
            .await;
        assert_eq!(
            response.status(),
            StatusCode::CREATED,
            "seeding user {email}"
        );
        read_json(response).await["data"].clone()
    }

    /// Seed one available inventory asset and return its record.
    #[allow(dead_code)]
    pub async fn seed_asset(&self, tag: &str, asset_type: &str) -> Value {
        let response = self
            .post(
                "/api/v1/assets",
                json!({
                    "assetTag": tag,
                    "assetType": asset_type,
                    "brand": "Lenovo",
                    "condition": "Good",
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED, "seeding asset {tag}");
        read_json(response).await["data"].clone()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

/// Parse a response body as JSON.
pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
