//! HTTP-level tests for `/studies`: relation resolution and additive merge.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create, create_country_code, create_policy, create_step, delete,
    get, id_of, post_json, put_json,
};
use serde_json::json;
use uuid::Uuid;

fn codes(study: &serde_json::Value) -> Vec<String> {
    study["countryCodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn create_without_relations_has_empty_collections() {
    let app = build_test_app().await;
    let study = create(
        &app,
        "/api/v1/studies",
        json!({ "name": "Sleep", "description": "Night habits" }),
    )
    .await;

    assert_eq!(study["countryCodes"], json!([]));
    assert_eq!(study["policies"], json!([]));
    assert!(study["onboarding"].is_null());
}

#[tokio::test]
async fn create_resolves_every_relation() {
    let app = build_test_app().await;
    let us = create_country_code(&app, "US").await;
    let tos = create_policy(&app, "TermsOfService").await;
    let step = create_step(&app, "intro").await;
    let onboarding = create(
        &app,
        "/api/v1/onboardings",
        json!({ "name": "Welcome", "stepIds": [id_of(&step)] }),
    )
    .await;

    let study = create(
        &app,
        "/api/v1/studies",
        json!({
            "name": "Sleep",
            "description": "",
            "countryCodeIds": [id_of(&us)],
            "policyIds": [id_of(&tos)],
            "onboardingId": id_of(&onboarding)
        }),
    )
    .await;

    assert_eq!(codes(&study), ["US"]);
    assert_eq!(study["policies"][0]["type"], "TermsOfService");
    assert_eq!(study["onboarding"]["steps"][0]["title"], "intro");
}

#[tokio::test]
async fn unknown_country_codes_are_rejected() {
    let app = build_test_app().await;
    let response = post_json(
        &app,
        "/api/v1/studies",
        json!({ "name": "Sleep", "description": "", "countryCodeIds": [Uuid::new_v4()] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "No Country Codes with the given id exist"
    );
}

#[tokio::test]
async fn unknown_onboarding_is_not_found() {
    let app = build_test_app().await;
    let response = post_json(
        &app,
        "/api/v1/studies",
        json!({ "name": "Sleep", "description": "", "onboardingId": Uuid::new_v4() }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Onboarding not found");
}

#[tokio::test]
async fn update_merges_country_codes_and_policies() {
    let app = build_test_app().await;
    let us = create_country_code(&app, "US").await;
    let de = create_country_code(&app, "DE").await;
    let tos = create_policy(&app, "TermsOfService").await;
    let privacy = create_policy(&app, "PrivacyPolicy").await;
    let study = create(
        &app,
        "/api/v1/studies",
        json!({
            "name": "Sleep",
            "description": "",
            "countryCodeIds": [id_of(&us)],
            "policyIds": [id_of(&tos)]
        }),
    )
    .await;

    let response = put_json(
        &app,
        &format!("/api/v1/studies/{}", id_of(&study)),
        json!({
            "countryCodeIds": [id_of(&de), id_of(&us)],
            "policyIds": [id_of(&privacy), Uuid::new_v4()]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(codes(&json), ["US", "DE"]);
    let types: Vec<&str> = json["policies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["TermsOfService", "PrivacyPolicy"]);
    assert_eq!(json["updatedBy"], json!(app.api_key_id));
}

#[tokio::test]
async fn update_with_only_unknown_policies_changes_nothing() {
    let app = build_test_app().await;
    let study = create(
        &app,
        "/api/v1/studies",
        json!({ "name": "Sleep", "description": "" }),
    )
    .await;
    let id = id_of(&study);

    let response = put_json(
        &app,
        &format!("/api/v1/studies/{id}"),
        json!({ "name": "Renamed", "policyIds": [Uuid::new_v4()] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "No Policies with the given id exist");

    let json = body_json(get(&app, &format!("/api/v1/studies/{id}")).await).await;
    assert_eq!(json["name"], "Sleep");
}

#[tokio::test]
async fn removing_onboarding_nulls_study_reference() {
    let app = build_test_app().await;
    let step = create_step(&app, "intro").await;
    let onboarding = create(
        &app,
        "/api/v1/onboardings",
        json!({ "name": "Welcome", "stepIds": [id_of(&step)] }),
    )
    .await;
    let study = create(
        &app,
        "/api/v1/studies",
        json!({ "name": "Sleep", "description": "", "onboardingId": id_of(&onboarding) }),
    )
    .await;

    delete(&app, &format!("/api/v1/onboardings/{}", id_of(&onboarding))).await;

    let json = body_json(get(&app, &format!("/api/v1/studies/{}", id_of(&study))).await).await;
    assert!(json["onboarding"].is_null());
}

#[tokio::test]
async fn list_returns_creation_order() {
    let app = build_test_app().await;
    for name in ["first", "second"] {
        create(&app, "/api/v1/studies", json!({ "name": name, "description": "" })).await;
    }

    let json = body_json(get(&app, "/api/v1/studies").await).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["first", "second"]);
}
