//! HTTP-level tests for the `X-API-KEY` guard.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_country_code, get, post_json_anonymous, post_json_with_key,
};
use serde_json::json;

#[tokio::test]
async fn mutation_without_key_is_unauthorized() {
    let app = build_test_app().await;
    let response = post_json_anonymous(
        &app,
        "/api/v1/country-codes",
        json!({ "code": "US", "countryName": "United States" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["statusCode"], 401);
    assert_eq!(json["error"], "Unauthorized");
}

#[tokio::test]
async fn mutation_with_unknown_key_is_unauthorized() {
    let app = build_test_app().await;
    let response = post_json_with_key(
        &app,
        "/api/v1/country-codes",
        json!({ "code": "US", "countryName": "United States" }),
        "not-a-registered-key",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Invalid API key");
}

#[tokio::test]
async fn unauthorized_request_writes_nothing() {
    let app = build_test_app().await;
    post_json_anonymous(
        &app,
        "/api/v1/country-codes",
        json!({ "code": "US", "countryName": "United States" }),
    )
    .await;

    let json = body_json(get(&app, "/api/v1/country-codes").await).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn reads_are_public_and_writes_are_stamped() {
    let app = build_test_app().await;
    let created = create_country_code(&app, "US").await;
    assert_eq!(created["createdBy"], json!(app.api_key_id));
    assert_eq!(created["updatedBy"], json!(app.api_key_id));

    let response = get(&app, "/api/v1/country-codes").await;
    assert_eq!(response.status(), StatusCode::OK);
}
