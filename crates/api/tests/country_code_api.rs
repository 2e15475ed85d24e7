//! HTTP-level tests for `/country-codes` and `/policies`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_country_code, create_policy, delete, get, id_of, post_json,
    put_json,
};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn find_unknown_country_code_is_404() {
    let app = build_test_app().await;
    let response = get(&app, &format!("/api/v1/country-codes/{}", Uuid::new_v4())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["statusCode"], 404);
    assert_eq!(json["message"], "Country Code not found");
    assert_eq!(json["error"], "Not Found");
}

#[tokio::test]
async fn create_and_fetch_country_code() {
    let app = build_test_app().await;
    let created = create_country_code(&app, "US").await;
    assert_eq!(created["countryName"], "Country US");
    assert_eq!(created["createdBy"], json!(app.api_key_id));

    let response = get(&app, &format!("/api/v1/country-codes/{}", id_of(&created))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["code"], "US");
}

#[tokio::test]
async fn duplicate_code_is_conflict() {
    let app = build_test_app().await;
    create_country_code(&app, "US").await;

    let response = post_json(
        &app,
        "/api/v1/country-codes",
        json!({ "code": "US", "countryName": "Again" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn renaming_to_a_taken_code_is_conflict() {
    let app = build_test_app().await;
    create_country_code(&app, "US").await;
    let de = create_country_code(&app, "DE").await;

    let response = put_json(
        &app,
        &format!("/api/v1/country-codes/{}", id_of(&de)),
        json!({ "code": "US" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_keeps_omitted_fields() {
    let app = build_test_app().await;
    let de = create_country_code(&app, "DE").await;

    let response = put_json(
        &app,
        &format!("/api/v1/country-codes/{}", id_of(&de)),
        json!({ "countryName": "Germany" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["code"], "DE");
    assert_eq!(json["countryName"], "Germany");
}

#[tokio::test]
async fn delete_returns_removed_country_code() {
    let app = build_test_app().await;
    let fr = create_country_code(&app, "FR").await;

    let response = delete(&app, &format!("/api/v1/country-codes/{}", id_of(&fr))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["code"], "FR");

    let response = delete(&app, &format!("/api/v1/country-codes/{}", id_of(&fr))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = build_test_app().await;
    let response = post_json(&app, "/api/v1/country-codes", json!({ "code": "US" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["statusCode"], 400);
}

#[tokio::test]
async fn policies_can_be_filtered_by_type() {
    let app = build_test_app().await;
    create_policy(&app, "TermsOfService").await;
    create_policy(&app, "PrivacyPolicy").await;

    let json = body_json(get(&app, "/api/v1/policies?type=PrivacyPolicy").await).await;
    let policies = json.as_array().unwrap();
    assert_eq!(policies.len(), 1);
    assert_eq!(policies[0]["type"], "PrivacyPolicy");

    let json = body_json(get(&app, "/api/v1/policies").await).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_policy_type_filter_is_bad_request() {
    let app = build_test_app().await;
    let response = get(&app, "/api/v1/policies?type=Cookies").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
