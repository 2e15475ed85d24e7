//! HTTP-level tests for `/onboardings` and `/onboarding-steps`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create, create_form, create_step, delete, get, id_of, post_json,
    put_json,
};
use serde_json::json;
use uuid::Uuid;

fn step_titles(onboarding: &serde_json::Value) -> Vec<String> {
    onboarding["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn create_keeps_requested_step_order() {
    let app = build_test_app().await;
    let a = create_step(&app, "a").await;
    let b = create_step(&app, "b").await;

    let onboarding = create(
        &app,
        "/api/v1/onboardings",
        json!({ "name": "Welcome", "stepIds": [id_of(&b), id_of(&a)] }),
    )
    .await;

    assert_eq!(step_titles(&onboarding), ["b", "a"]);
    assert!(onboarding["form"].is_null());
}

#[tokio::test]
async fn create_requires_step_ids() {
    let app = build_test_app().await;
    let response = post_json(&app, "/api/v1/onboardings", json!({ "name": "Welcome", "stepIds": [] })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "stepIds should not be empty");
}

#[tokio::test]
async fn create_with_only_unknown_steps_is_rejected() {
    let app = build_test_app().await;
    let response = post_json(
        &app,
        "/api/v1/onboardings",
        json!({ "name": "Welcome", "stepIds": [Uuid::new_v4()] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "No Onboarding steps with the given id exist"
    );
}

#[tokio::test]
async fn create_with_unknown_form_is_not_found() {
    let app = build_test_app().await;
    let a = create_step(&app, "a").await;
    let response = post_json(
        &app,
        "/api/v1/onboardings",
        json!({ "name": "Welcome", "stepIds": [id_of(&a)], "formId": Uuid::new_v4() }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Form not found");
}

#[tokio::test]
async fn update_merges_new_steps_after_existing() {
    let app = build_test_app().await;
    let a = create_step(&app, "a").await;
    let b = create_step(&app, "b").await;
    let onboarding = create(
        &app,
        "/api/v1/onboardings",
        json!({ "name": "Welcome", "stepIds": [id_of(&a)] }),
    )
    .await;
    let id = id_of(&onboarding);

    let response = put_json(
        &app,
        &format!("/api/v1/onboardings/{id}"),
        json!({ "stepIds": [id_of(&b), id_of(&a)] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(step_titles(&json), ["a", "b"]);
    assert_eq!(json["name"], "Welcome");
}

#[tokio::test]
async fn update_with_unknown_step_is_rejected() {
    let app = build_test_app().await;
    let a = create_step(&app, "a").await;
    let onboarding = create(
        &app,
        "/api/v1/onboardings",
        json!({ "name": "Welcome", "stepIds": [id_of(&a)] }),
    )
    .await;
    let id = id_of(&onboarding);

    let response = put_json(
        &app,
        &format!("/api/v1/onboardings/{id}"),
        json!({ "stepIds": [Uuid::new_v4()] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "No Onboarding steps with the given id exist"
    );
}

#[tokio::test]
async fn update_replaces_form() {
    let app = build_test_app().await;
    let a = create_step(&app, "a").await;
    let first = create_form(&app, "First").await;
    let second = create_form(&app, "Second").await;
    let onboarding = create(
        &app,
        "/api/v1/onboardings",
        json!({ "name": "Welcome", "stepIds": [id_of(&a)], "formId": id_of(&first) }),
    )
    .await;
    assert_eq!(onboarding["form"]["name"], "First");

    let response = put_json(
        &app,
        &format!("/api/v1/onboardings/{}", id_of(&onboarding)),
        json!({ "formId": id_of(&second) }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["form"]["name"], "Second");
    assert_eq!(json["form"]["fields"][0]["type"], "Slider");
}

#[tokio::test]
async fn removing_a_step_detaches_it() {
    let app = build_test_app().await;
    let a = create_step(&app, "a").await;
    let b = create_step(&app, "b").await;
    let onboarding = create(
        &app,
        "/api/v1/onboardings",
        json!({ "name": "Welcome", "stepIds": [id_of(&a), id_of(&b)] }),
    )
    .await;

    let response = delete(&app, &format!("/api/v1/onboarding-steps/{}", id_of(&a))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(&app, &format!("/api/v1/onboardings/{}", id_of(&onboarding))).await).await;
    assert_eq!(step_titles(&json), ["b"]);
}

#[tokio::test]
async fn removing_a_form_nulls_the_reference() {
    let app = build_test_app().await;
    let a = create_step(&app, "a").await;
    let form = create_form(&app, "Survey").await;
    let onboarding = create(
        &app,
        "/api/v1/onboardings",
        json!({ "name": "Welcome", "stepIds": [id_of(&a)], "formId": id_of(&form) }),
    )
    .await;

    delete(&app, &format!("/api/v1/forms/{}", id_of(&form))).await;

    let json = body_json(get(&app, &format!("/api/v1/onboardings/{}", id_of(&onboarding))).await).await;
    assert!(json["form"].is_null());
}

#[tokio::test]
async fn step_update_is_partial() {
    let app = build_test_app().await;
    let step = create_step(&app, "intro").await;
    let id = id_of(&step);

    let response = put_json(
        &app,
        &format!("/api/v1/onboarding-steps/{id}"),
        json!({ "order": 3, "platform": "android" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "intro");
    assert_eq!(json["order"], 3);
    assert_eq!(json["platform"], "android");
}

#[tokio::test]
async fn step_with_negative_order_is_rejected() {
    let app = build_test_app().await;
    let response = post_json(
        &app,
        "/api/v1/onboarding-steps",
        json!({
            "title": "bad",
            "subtitle": "",
            "description": "",
            "imageUrl": "https://cdn.test/bad.png",
            "details": "",
            "order": -1
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "order must not be negative");
}
