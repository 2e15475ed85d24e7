//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, build_router, build_test_app, get, TestApp};
use reporter_db::memory::MemoryStore;
use reporter_db::stores::{HealthStore, StoreResult, Stores};

/// A database that never answers.
struct UnreachableDatabase;

#[async_trait]
impl HealthStore for UnreachableDatabase {
    async fn ping(&self) -> StoreResult<()> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = build_test_app().await;
    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

// ---------------------------------------------------------------------------
// Test: an unreachable database degrades the status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_database_reports_degraded() {
    let mut stores = Stores::in_memory(Arc::new(MemoryStore::new()));
    stores.health = Arc::new(UnreachableDatabase);
    let app = TestApp {
        router: build_router(stores.clone()),
        stores,
        api_key_id: uuid::Uuid::nil(),
    };

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

// ---------------------------------------------------------------------------
// Test: unknown route returns 404 and responses carry x-request-id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app().await;
    let response = get(&app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app().await;
    let response = get(&app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
