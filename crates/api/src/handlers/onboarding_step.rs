//! Handlers for the `/onboarding-steps` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reporter_core::error::CoreError;
use reporter_core::types::DbId;
use reporter_db::models::onboarding_step::{
    CreateOnboardingStep, OnboardingStep, UpdateOnboardingStep,
};

use crate::dto::{map_all, OnboardingStepDto};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::api_key::ApiKeyAuth;
use crate::state::AppState;

const ENTITY: &str = "Onboarding Step";

async fn load(state: &AppState, id: DbId) -> AppResult<OnboardingStep> {
    state
        .stores
        .onboarding_steps
        .find_one(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))
}

/// POST /api/v1/onboarding-steps
pub async fn create(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    ValidatedJson(input): ValidatedJson<CreateOnboardingStep>,
) -> AppResult<(StatusCode, Json<OnboardingStepDto>)> {
    let step = state
        .stores
        .onboarding_steps
        .create(&input, Some(principal.api_key_id))
        .await?;

    tracing::info!(step_id = %step.id, "Onboarding step created");
    Ok((StatusCode::CREATED, Json(OnboardingStepDto::from(&step))))
}

/// GET /api/v1/onboarding-steps
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<OnboardingStepDto>>> {
    let steps = state.stores.onboarding_steps.find().await?;
    Ok(Json(map_all(&steps)))
}

/// GET /api/v1/onboarding-steps/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OnboardingStepDto>> {
    let step = load(&state, id).await?;
    Ok(Json(OnboardingStepDto::from(&step)))
}

/// PUT /api/v1/onboarding-steps/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateOnboardingStep>,
) -> AppResult<Json<OnboardingStepDto>> {
    let mut step = load(&state, id).await?;
    input.apply_to(&mut step);
    step.updated_by = Some(principal.api_key_id);
    let saved = state.stores.onboarding_steps.save(&step).await?;

    tracing::info!(step_id = %id, "Onboarding step updated");
    Ok(Json(OnboardingStepDto::from(&saved)))
}

/// DELETE /api/v1/onboarding-steps/{id}
///
/// The step is detached from every onboarding that listed it.
pub async fn delete(
    State(state): State<AppState>,
    ApiKeyAuth(_principal): ApiKeyAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<OnboardingStepDto>> {
    let step = load(&state, id).await?;
    let removed = state.stores.onboarding_steps.remove(&step).await?;

    tracing::info!(step_id = %id, "Onboarding step removed");
    Ok(Json(OnboardingStepDto::from(&removed)))
}
