//! Handlers for the `/studies` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reporter_core::error::CoreError;
use reporter_core::relations::{
    merge_by_id, order_by_request, require_resolved, NO_COUNTRY_CODES_FOUND, NO_POLICIES_FOUND,
};
use reporter_core::types::DbId;
use reporter_db::models::country_code::CountryCode;
use reporter_db::models::onboarding::Onboarding;
use reporter_db::models::policy::Policy;
use reporter_db::models::study::{CreateStudy, NewStudy, Study, UpdateStudy};

use crate::dto::{map_all, StudyDto};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::api_key::ApiKeyAuth;
use crate::state::AppState;

const ENTITY: &str = "Study";

async fn load(state: &AppState, id: DbId) -> AppResult<Study> {
    state
        .stores
        .studies
        .find_one(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))
}

async fn resolve_country_codes(state: &AppState, ids: &[DbId]) -> AppResult<Vec<CountryCode>> {
    let found = state.stores.country_codes.find_by_ids(ids).await?;
    let found = require_resolved(ids, found, NO_COUNTRY_CODES_FOUND)?;
    Ok(order_by_request(ids, found))
}

async fn resolve_policies(state: &AppState, ids: &[DbId]) -> AppResult<Vec<Policy>> {
    let found = state.stores.policies.find_by_ids(ids).await?;
    let found = require_resolved(ids, found, NO_POLICIES_FOUND)?;
    Ok(order_by_request(ids, found))
}

async fn resolve_onboarding(state: &AppState, id: DbId) -> AppResult<Onboarding> {
    state
        .stores
        .onboardings
        .find_one(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Onboarding" }))
}

/// POST /api/v1/studies
pub async fn create(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    ValidatedJson(input): ValidatedJson<CreateStudy>,
) -> AppResult<(StatusCode, Json<StudyDto>)> {
    let country_codes = resolve_country_codes(&state, &input.country_code_ids).await?;
    let policies = resolve_policies(&state, &input.policy_ids).await?;
    let onboarding_id = match input.onboarding_id {
        Some(onboarding_id) => Some(resolve_onboarding(&state, onboarding_id).await?.id),
        None => None,
    };

    let study = state
        .stores
        .studies
        .create(&NewStudy {
            name: input.name,
            description: input.description,
            country_code_ids: country_codes.iter().map(|c| c.id).collect(),
            policy_ids: policies.iter().map(|p| p.id).collect(),
            onboarding_id,
            created_by: Some(principal.api_key_id),
        })
        .await?;

    tracing::info!(study_id = %study.id, "Study created");
    Ok((StatusCode::CREATED, Json(StudyDto::from(&study))))
}

/// GET /api/v1/studies
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<StudyDto>>> {
    let studies = state.stores.studies.find().await?;
    Ok(Json(map_all(&studies)))
}

/// GET /api/v1/studies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StudyDto>> {
    let study = load(&state, id).await?;
    Ok(Json(StudyDto::from(&study)))
}

/// PUT /api/v1/studies/{id}
///
/// `countryCodeIds` and `policyIds` are merged into the current relations;
/// `onboardingId` replaces the current onboarding.
pub async fn update(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateStudy>,
) -> AppResult<Json<StudyDto>> {
    let mut study = load(&state, id).await?;

    let new_country_codes = match &input.country_code_ids {
        Some(ids) => Some(resolve_country_codes(&state, ids).await?),
        None => None,
    };
    let new_policies = match &input.policy_ids {
        Some(ids) => Some(resolve_policies(&state, ids).await?),
        None => None,
    };
    let new_onboarding = match input.onboarding_id {
        Some(onboarding_id) => Some(resolve_onboarding(&state, onboarding_id).await?),
        None => None,
    };

    if let Some(name) = input.name {
        study.name = name;
    }
    if let Some(description) = input.description {
        study.description = description;
    }
    if let Some(country_codes) = new_country_codes {
        study.country_codes = merge_by_id(study.country_codes, country_codes);
    }
    if let Some(policies) = new_policies {
        study.policies = merge_by_id(study.policies, policies);
    }
    if let Some(onboarding) = new_onboarding {
        study.onboarding = Some(onboarding);
    }
    study.updated_by = Some(principal.api_key_id);
    let saved = state.stores.studies.save(&study).await?;

    tracing::info!(study_id = %id, "Study updated");
    Ok(Json(StudyDto::from(&saved)))
}

/// DELETE /api/v1/studies/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiKeyAuth(_principal): ApiKeyAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<StudyDto>> {
    let study = load(&state, id).await?;
    let removed = state.stores.studies.remove(&study).await?;

    tracing::info!(study_id = %id, "Study removed");
    Ok(Json(StudyDto::from(&removed)))
}
