use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use ecommerce_api::{config::AppConfig, db, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper harness for spinning up the application against a fresh SQLite file.
pub struct TestApp {
    router: Router,
    #[allow(dead_code)]
    pub state: AppState,
    _db_dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with an empty database.
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = db_dir.path().join("ecommerce_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.cors_allow_any_origin = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_with_config(&db::DbConfig::from(&cfg))
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = ecommerce_api::app_router(state.clone());

        Self {
            router,
            state,
            _db_dir: db_dir,
        }
    }

    /// Send a request against the router with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
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

    /// Send a request with a raw body, for payloads that are not valid JSON.
    #[allow(dead_code)]
    pub async fn request_raw(&self, method: Method, uri: &str, raw: &'static str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(raw))
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Request and decode the JSON body, returning status and body.
    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        (status, response_json(response).await)
    }

    #[allow(dead_code)]
    pub async fn create_customer(&self, name: &str) -> i64 {
        let (status, body) = self
            .call(
                Method::POST,
                "/customers",
                Some(json!({"name": name, "email": format!("{name}@example.com"), "address": "1 Main St"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["customer"]["id"].as_i64().expect("customer id")
    }

    #[allow(dead_code)]
    pub async fn create_product(&self, name: &str, price: f64) -> i64 {
        let (status, body) = self
            .call(
                Method::POST,
                "/products",
                Some(json!({"product_name": name, "price": price})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["product"]["id"].as_i64().expect("product id")
    }

    #[allow(dead_code)]
    pub async fn create_order(&self, customer_id: i64) -> i64 {
        let (status, body) = self
            .call(
                Method::POST,
                "/orders",
                Some(json!({"order_date": "2024-01-01", "customer_id": customer_id})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["order"]["id"].as_i64().expect("order id")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}
