//! Handlers for the `/forms` resource.
//!
//! Field lists arrive as raw JSON. They are validated as a whole (every
//! problem reported at once), parsed, and mapped to stored fields with fresh
//! ids before anything is written.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reporter_core::error::CoreError;
use reporter_core::fields::mapping::map_fields;
use reporter_core::fields::validation::parse_fields;
use reporter_core::fields::Field;
use reporter_core::types::DbId;
use reporter_db::models::form::{CreateForm, Form, NewForm, UpdateForm};

use crate::dto::{map_all, FormDto};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::api_key::ApiKeyAuth;
use crate::state::AppState;

const ENTITY: &str = "Form";

async fn load(state: &AppState, id: DbId) -> AppResult<Form> {
    state
        .stores
        .forms
        .find_one(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))
}

/// Validate, parse and map a raw field list.
fn build_fields(raw: Vec<serde_json::Value>) -> AppResult<Vec<Field>> {
    let inputs = parse_fields(raw)?;
    Ok(map_fields(inputs))
}

/// POST /api/v1/forms
pub async fn create(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    ValidatedJson(input): ValidatedJson<CreateForm>,
) -> AppResult<(StatusCode, Json<FormDto>)> {
    let fields = build_fields(input.fields)?;
    let form = state
        .stores
        .forms
        .create(&NewForm {
            name: input.name,
            fields,
            created_by: Some(principal.api_key_id),
        })
        .await?;

    tracing::info!(form_id = %form.id, fields = form.fields.len(), "Form created");
    Ok((StatusCode::CREATED, Json(FormDto::from(&form))))
}

/// GET /api/v1/forms
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<FormDto>>> {
    let forms = state.stores.forms.find().await?;
    Ok(Json(map_all(&forms)))
}

/// GET /api/v1/forms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FormDto>> {
    let form = load(&state, id).await?;
    Ok(Json(FormDto::from(&form)))
}

/// PUT /api/v1/forms/{id}
///
/// A `fields` list replaces the stored fields entirely.
pub async fn update(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateForm>,
) -> AppResult<Json<FormDto>> {
    let mut form = load(&state, id).await?;
    if let Some(raw) = input.fields {
        form.fields = build_fields(raw)?;
    }
    if let Some(name) = input.name {
        form.name = name;
    }
    form.updated_by = Some(principal.api_key_id);
    let saved = state.stores.forms.save(&form).await?;

    tracing::info!(form_id = %id, "Form updated");
    Ok(Json(FormDto::from(&saved)))
}

/// DELETE /api/v1/forms/{id}
///
/// Onboardings that used the form keep existing without one.
pub async fn delete(
    State(state): State<AppState>,
    ApiKeyAuth(_principal): ApiKeyAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<FormDto>> {
    let form = load(&state, id).await?;
    let removed = state.stores.forms.remove(&form).await?;

    tracing::info!(form_id = %id, "Form removed");
    Ok(Json(FormDto::from(&removed)))
}
