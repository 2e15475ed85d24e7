//! HTTP-level tests for `/forms`: polymorphic field validation and mapping.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create, delete, get, id_of, post_json, put_json, slider_field};
use serde_json::json;

fn text_field() -> serde_json::Value {
    json!({
        "type": "TextField",
        "label": "TikTok link",
        "description": "Paste the link to your video",
        "isRequired": true,
        "placeholder": "https://www.tiktok.com/...",
        "multiline": false,
        "isTikTokLink": true,
        "maxLines": 1
    })
}

fn dropdown_field(selected: &str) -> serde_json::Value {
    json!({
        "type": "DropDown",
        "label": "Age group",
        "description": "How old are you?",
        "placeholder": "Choose",
        "options": [{ "title": "18-24" }, { "title": "25-34" }],
        "selected": selected
    })
}

#[tokio::test]
async fn create_form_maps_every_variant() {
    let app = build_test_app().await;
    let form = create(
        &app,
        "/api/v1/forms",
        json!({
            "name": "Entry survey",
            "fields": [text_field(), dropdown_field("25-34"), slider_field("Mood")]
        }),
    )
    .await;

    let fields = form["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 3);
    assert!(fields.iter().all(|f| f["id"].is_string()));

    assert_eq!(fields[0]["type"], "TextField");
    assert_eq!(fields[0]["isTikTokLink"], true);
    assert!(fields[0].get("options").is_none());

    let options = fields[1]["options"].as_array().unwrap();
    assert_eq!(fields[1]["selected"], options[1]["id"]);
    assert_eq!(fields[1]["hasOtherOption"], false);
    assert_eq!(fields[1]["isRequired"], false);

    assert_eq!(fields[2]["max"], 100.0);
    assert_eq!(fields[2]["leftLabel"], "Min");
    assert_eq!(fields[2]["rightLabel"], "Max");
    assert_eq!(fields[2]["step"], 5.0);

    assert_eq!(form["createdBy"], json!(app.api_key_id));
}

#[tokio::test]
async fn unmatched_selection_is_stored_empty() {
    let app = build_test_app().await;
    let form = create(
        &app,
        "/api/v1/forms",
        json!({ "name": "Survey", "fields": [dropdown_field("65+")] }),
    )
    .await;
    assert_eq!(form["fields"][0]["selected"], "");
}

#[tokio::test]
async fn empty_fields_are_rejected() {
    let app = build_test_app().await;
    let response = post_json(&app, "/api/v1/forms", json!({ "name": "Empty", "fields": [] })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["statusCode"], 400);
    assert_eq!(json["message"], "The fields property cannot be empty");
    assert_eq!(json["error"], "Bad Request");
}

#[tokio::test]
async fn unknown_type_and_bad_attributes_are_all_reported() {
    let app = build_test_app().await;
    let response = post_json(
        &app,
        "/api/v1/forms",
        json!({
            "name": "Broken",
            "fields": [{ "type": "Checkbox", "label": 7, "description": "ok" }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "label must be a string;One of the fields does not have the correct type"
    );
}

#[tokio::test]
async fn dropdown_without_options_is_rejected() {
    let app = build_test_app().await;
    let mut field = dropdown_field("");
    field["options"] = json!([]);
    let response = post_json(&app, "/api/v1/forms", json!({ "name": "Survey", "fields": [field] })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Options cannot be empty");
}

#[tokio::test]
async fn non_object_field_is_reported_generically() {
    let app = build_test_app().await;
    let response =
        post_json(&app, "/api/v1/forms", json!({ "name": "Survey", "fields": ["oops"] })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "The fields could not be validated");
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_name() {
    let app = build_test_app().await;
    let form = create(
        &app,
        "/api/v1/forms",
        json!({ "name": "Survey", "fields": [text_field(), slider_field("Mood")] }),
    )
    .await;
    let id = id_of(&form);

    let response = put_json(
        &app,
        &format!("/api/v1/forms/{id}"),
        json!({ "fields": [slider_field("Energy")] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Survey");
    assert_eq!(json["fields"].as_array().unwrap().len(), 1);
    assert_eq!(json["fields"][0]["label"], "Energy");
}

#[tokio::test]
async fn update_with_invalid_fields_changes_nothing() {
    let app = build_test_app().await;
    let form = create(&app, "/api/v1/forms", json!({ "name": "Survey", "fields": [text_field()] })).await;
    let id = id_of(&form);

    let response = put_json(
        &app,
        &format!("/api/v1/forms/{id}"),
        json!({ "name": "Renamed", "fields": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get(&app, &format!("/api/v1/forms/{id}")).await).await;
    assert_eq!(json["name"], "Survey");
    assert_eq!(json["fields"][0]["type"], "TextField");
}

#[tokio::test]
async fn delete_returns_removed_form() {
    let app = build_test_app().await;
    let form = create(&app, "/api/v1/forms", json!({ "name": "Gone", "fields": [slider_field("x")] })).await;
    let id = id_of(&form);

    let response = delete(&app, &format!("/api/v1/forms/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Gone");

    let response = get(&app, &format!("/api/v1/forms/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Form not found");
}
