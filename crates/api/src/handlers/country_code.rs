//! Handlers for the `/country-codes` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reporter_core::error::CoreError;
use reporter_core::types::DbId;
use reporter_db::models::country_code::{CountryCode, CreateCountryCode, UpdateCountryCode};

use crate::dto::{map_all, CountryCodeDto};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::api_key::ApiKeyAuth;
use crate::state::AppState;

const ENTITY: &str = "Country Code";

async fn load(state: &AppState, id: DbId) -> AppResult<CountryCode> {
    state
        .stores
        .country_codes
        .find_one(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))
}

/// Fail with 409 when `code` already belongs to a different row.
async fn ensure_code_free(state: &AppState, code: &str, except: Option<DbId>) -> AppResult<()> {
    match state.stores.country_codes.find_by_code(code).await? {
        Some(existing) if Some(existing.id) != except => Err(AppError::Core(
            CoreError::Conflict(format!("Country code '{code}' already exists")),
        )),
        _ => Ok(()),
    }
}

/// POST /api/v1/country-codes
pub async fn create(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    ValidatedJson(input): ValidatedJson<CreateCountryCode>,
) -> AppResult<(StatusCode, Json<CountryCodeDto>)> {
    ensure_code_free(&state, &input.code, None).await?;

    let country_code = state
        .stores
        .country_codes
        .create(&input, Some(principal.api_key_id))
        .await?;

    tracing::info!(
        country_code_id = %country_code.id,
        code = %country_code.code,
        app = %principal.app_name,
        "Country code created",
    );
    Ok((StatusCode::CREATED, Json(CountryCodeDto::from(&country_code))))
}

/// GET /api/v1/country-codes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CountryCodeDto>>> {
    let country_codes = state.stores.country_codes.find().await?;
    Ok(Json(map_all(&country_codes)))
}

/// GET /api/v1/country-codes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CountryCodeDto>> {
    let country_code = load(&state, id).await?;
    Ok(Json(CountryCodeDto::from(&country_code)))
}

/// PUT /api/v1/country-codes/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateCountryCode>,
) -> AppResult<Json<CountryCodeDto>> {
    let mut country_code = load(&state, id).await?;
    if let Some(code) = &input.code {
        ensure_code_free(&state, code, Some(id)).await?;
    }

    input.apply_to(&mut country_code);
    country_code.updated_by = Some(principal.api_key_id);
    let saved = state.stores.country_codes.save(&country_code).await?;

    tracing::info!(country_code_id = %id, "Country code updated");
    Ok(Json(CountryCodeDto::from(&saved)))
}

/// DELETE /api/v1/country-codes/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiKeyAuth(_principal): ApiKeyAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<CountryCodeDto>> {
    let country_code = load(&state, id).await?;
    let removed = state.stores.country_codes.remove(&country_code).await?;

    tracing::info!(country_code_id = %id, "Country code removed");
    Ok(Json(CountryCodeDto::from(&removed)))
}
