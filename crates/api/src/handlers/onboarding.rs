//! Handlers for the `/onboardings` resource.
//!
//! Step ids are resolved in one batch. Creation needs at least one step that
//! exists; updates append newly resolved steps after the existing ones and
//! never remove any.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reporter_core::error::CoreError;
use reporter_core::relations::{merge_by_id, order_by_request, require_resolved, NO_STEPS_FOUND};
use reporter_core::types::DbId;
use reporter_db::models::form::Form;
use reporter_db::models::onboarding::{
    CreateOnboarding, NewOnboarding, Onboarding, UpdateOnboarding,
};
use reporter_db::models::onboarding_step::OnboardingStep;

use crate::dto::{map_all, OnboardingDto};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::api_key::ApiKeyAuth;
use crate::state::AppState;

const ENTITY: &str = "Onboarding";

async fn load(state: &AppState, id: DbId) -> AppResult<Onboarding> {
    state
        .stores
        .onboardings
        .find_one(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))
}

/// Resolve `ids` to steps in request order; 400 if none exist.
async fn resolve_steps(state: &AppState, ids: &[DbId]) -> AppResult<Vec<OnboardingStep>> {
    let found = state.stores.onboarding_steps.find_by_ids(ids).await?;
    let found = require_resolved(ids, found, NO_STEPS_FOUND)?;
    Ok(order_by_request(ids, found))
}

async fn resolve_form(state: &AppState, id: DbId) -> AppResult<Form> {
    state
        .stores
        .forms
        .find_one(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Form" }))
}

/// POST /api/v1/onboardings
pub async fn create(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    ValidatedJson(input): ValidatedJson<CreateOnboarding>,
) -> AppResult<(StatusCode, Json<OnboardingDto>)> {
    let steps = resolve_steps(&state, &input.step_ids).await?;
    let form_id = match input.form_id {
        Some(form_id) => Some(resolve_form(&state, form_id).await?.id),
        None => None,
    };

    let onboarding = state
        .stores
        .onboardings
        .create(&NewOnboarding {
            name: input.name,
            step_ids: steps.iter().map(|step| step.id).collect(),
            form_id,
            created_by: Some(principal.api_key_id),
        })
        .await?;

    tracing::info!(
        onboarding_id = %onboarding.id,
        steps = onboarding.steps.len(),
        "Onboarding created",
    );
    Ok((StatusCode::CREATED, Json(OnboardingDto::from(&onboarding))))
}

/// GET /api/v1/onboardings
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<OnboardingDto>>> {
    let onboardings = state.stores.onboardings.find().await?;
    Ok(Json(map_all(&onboardings)))
}

/// GET /api/v1/onboardings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OnboardingDto>> {
    let onboarding = load(&state, id).await?;
    Ok(Json(OnboardingDto::from(&onboarding)))
}

/// PUT /api/v1/onboardings/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateOnboarding>,
) -> AppResult<Json<OnboardingDto>> {
    let mut onboarding = load(&state, id).await?;

    // Resolve every reference before changing anything.
    let new_steps = match &input.step_ids {
        Some(ids) => Some(resolve_steps(&state, ids).await?),
        None => None,
    };
    let new_form = match input.form_id {
        Some(form_id) => Some(resolve_form(&state, form_id).await?),
        None => None,
    };

    if let Some(name) = input.name {
        onboarding.name = name;
    }
    if let Some(steps) = new_steps {
        onboarding.steps = merge_by_id(onboarding.steps, steps);
    }
    if let Some(form) = new_form {
        onboarding.form = Some(form);
    }
    onboarding.updated_by = Some(principal.api_key_id);
    let saved = state.stores.onboardings.save(&onboarding).await?;

    tracing::info!(onboarding_id = %id, steps = saved.steps.len(), "Onboarding updated");
    Ok(Json(OnboardingDto::from(&saved)))
}

/// DELETE /api/v1/onboardings/{id}
///
/// Studies that used the onboarding keep existing without one.
pub async fn delete(
    State(state): State<AppState>,
    ApiKeyAuth(_principal): ApiKeyAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<OnboardingDto>> {
    let onboarding = load(&state, id).await?;
    let removed = state.stores.onboardings.remove(&onboarding).await?;

    tracing::info!(onboarding_id = %id, "Onboarding removed");
    Ok(Json(OnboardingDto::from(&removed)))
}
