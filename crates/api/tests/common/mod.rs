#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use reporter_api::config::{ServerConfig, StorageConfig};
use reporter_api::router::build_app_router;
use reporter_api::state::AppState;
use reporter_api::storage::{StorageError, StorageService};
use reporter_core::api_keys::{hash_api_key, API_KEY_HEADER};
use reporter_core::types::DbId;
use reporter_db::memory::MemoryStore;
use reporter_db::models::api_key::NewApiKey;
use reporter_db::stores::Stores;

pub const TEST_API_KEY: &str = "test-api-key-0123456789";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        storage: StorageConfig {
            bucket: "reporter-test".to_string(),
            region: "us-east-1".to_string(),
            endpoint: None,
            signed_url_ttl_secs: 900,
        },
    }
}

/// Storage double that returns predictable URLs.
pub struct FakeStorage;

#[async_trait]
impl StorageService for FakeStorage {
    async fn upload_url(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, StorageError> {
        Ok(format!(
            "https://storage.test/{key}?method=PUT&type={content_type}&ttl={}",
            ttl.as_secs()
        ))
    }

    async fn download_url(&self, key: &str, ttl: Duration) -> Result<String, StorageError> {
        Ok(format!("https://storage.test/{key}?method=GET&ttl={}", ttl.as_secs()))
    }
}

/// A router over an in-memory store with one registered API key.
pub struct TestApp {
    pub router: Router,
    pub stores: Stores,
    pub api_key_id: DbId,
}

pub async fn build_test_app() -> TestApp {
    let stores = Stores::in_memory(Arc::new(MemoryStore::new()));
    let api_key = stores
        .api_keys
        .create(&NewApiKey {
            app_name: "test-app".to_string(),
            key_hash: hash_api_key(TEST_API_KEY),
        })
        .await
        .expect("register test key");

    TestApp {
        router: build_router(stores.clone()),
        stores,
        api_key_id: api_key.id,
    }
}

/// The full application router over the given stores and [`FakeStorage`].
pub fn build_router(stores: Stores) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        stores,
        storage: Arc::new(FakeStorage),
    };
    build_app_router(state, &config)
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: Option<Value>,
    api_key: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header(API_KEY_HEADER, key);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_with_key(app: &TestApp, uri: &str) -> Response {
    send(app, Method::GET, uri, None, Some(TEST_API_KEY)).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body), Some(TEST_API_KEY)).await
}

pub async fn put_json(app: &TestApp, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body), Some(TEST_API_KEY)).await
}

pub async fn delete(app: &TestApp, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None, Some(TEST_API_KEY)).await
}

/// POST without any API key header.
pub async fn post_json_anonymous(app: &TestApp, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body), None).await
}

/// POST with an arbitrary API key header.
pub async fn post_json_with_key(app: &TestApp, uri: &str, body: Value, key: &str) -> Response {
    send(app, Method::POST, uri, Some(body), Some(key)).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST and return the created body, asserting 201.
pub async fn create(app: &TestApp, uri: &str, body: Value) -> Value {
    let response = post_json(app, uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_step(app: &TestApp, title: &str) -> Value {
    create(
        app,
        "/api/v1/onboarding-steps",
        serde_json::json!({
            "title": title,
            "subtitle": "",
            "description": "",
            "imageUrl": format!("https://cdn.test/{title}.png"),
            "details": "",
            "order": 0,
            "platform": "ios"
        }),
    )
    .await
}

pub async fn create_country_code(app: &TestApp, code: &str) -> Value {
    create(
        app,
        "/api/v1/country-codes",
        serde_json::json!({ "code": code, "countryName": format!("Country {code}") }),
    )
    .await
}

pub async fn create_policy(app: &TestApp, policy_type: &str) -> Value {
    create(
        app,
        "/api/v1/policies",
        serde_json::json!({
            "type": policy_type,
            "title": policy_type,
            "subtitle": "",
            "text": "Lorem ipsum"
        }),
    )
    .await
}

pub fn slider_field(label: &str) -> Value {
    serde_json::json!({
        "type": "Slider",
        "label": label,
        "description": "Pick a value"
    })
}

pub async fn create_form(app: &TestApp, name: &str) -> Value {
    create(
        app,
        "/api/v1/forms",
        serde_json::json!({ "name": name, "fields": [slider_field("Mood")] }),
    )
    .await
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("id is a string").to_string()
}
