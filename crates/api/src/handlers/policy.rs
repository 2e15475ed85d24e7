//! Handlers for the `/policies` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use reporter_core::error::CoreError;
use reporter_core::policy::PolicyType;
use reporter_core::types::DbId;
use reporter_db::models::policy::{CreatePolicy, Policy, UpdatePolicy};
use serde::Deserialize;

use crate::dto::{map_all, PolicyDto};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::api_key::ApiKeyAuth;
use crate::state::AppState;

const ENTITY: &str = "Policy";

/// Query parameters for `GET /policies`.
///
/// `type` is parsed by hand so an unknown value gets the JSON error body.
#[derive(Debug, Deserialize)]
pub struct PolicyListParams {
    #[serde(rename = "type")]
    pub policy_type: Option<String>,
}

async fn load(state: &AppState, id: DbId) -> AppResult<Policy> {
    state
        .stores
        .policies
        .find_one(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))
}

/// POST /api/v1/policies
pub async fn create(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    ValidatedJson(input): ValidatedJson<CreatePolicy>,
) -> AppResult<(StatusCode, Json<PolicyDto>)> {
    let policy = state
        .stores
        .policies
        .create(&input, Some(principal.api_key_id))
        .await?;

    tracing::info!(policy_id = %policy.id, policy_type = %policy.policy_type, "Policy created");
    Ok((StatusCode::CREATED, Json(PolicyDto::from(&policy))))
}

/// GET /api/v1/policies?type=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PolicyListParams>,
) -> AppResult<Json<Vec<PolicyDto>>> {
    let policies = match params.policy_type.as_deref() {
        Some(raw) => {
            let policy_type: PolicyType = raw.parse()?;
            state.stores.policies.find_by_type(policy_type).await?
        }
        None => state.stores.policies.find().await?,
    };
    Ok(Json(map_all(&policies)))
}

/// GET /api/v1/policies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PolicyDto>> {
    let policy = load(&state, id).await?;
    Ok(Json(PolicyDto::from(&policy)))
}

/// PUT /api/v1/policies/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdatePolicy>,
) -> AppResult<Json<PolicyDto>> {
    let mut policy = load(&state, id).await?;
    input.apply_to(&mut policy);
    policy.updated_by = Some(principal.api_key_id);
    let saved = state.stores.policies.save(&policy).await?;

    tracing::info!(policy_id = %id, "Policy updated");
    Ok(Json(PolicyDto::from(&saved)))
}

/// DELETE /api/v1/policies/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiKeyAuth(_principal): ApiKeyAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<PolicyDto>> {
    let policy = load(&state, id).await?;
    let removed = state.stores.policies.remove(&policy).await?;

    tracing::info!(policy_id = %id, "Policy removed");
    Ok(Json(PolicyDto::from(&removed)))
}
