//! API-key authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use reporter_core::api_keys::{hash_api_key, API_KEY_HEADER};
use reporter_core::error::CoreError;
use reporter_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The client app a request was authenticated as.
///
/// Passed explicitly into create/update flows so audit columns can be
/// stamped without another lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub api_key_id: DbId,
    pub app_name: String,
}

/// Authenticated caller, resolved from the `X-API-KEY` header.
///
/// Use this as an extractor parameter in any handler that mutates data:
///
/// ```ignore
/// async fn create(ApiKeyAuth(principal): ApiKeyAuth) -> AppResult<Json<()>> {
///     tracing::info!(app = %principal.app_name, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiKeyAuth(pub Principal);

impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing X-API-KEY header".into()))
            })?;

        let api_key = state
            .stores
            .api_keys
            .find_by_hash(&hash_api_key(key))
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid API key".into())))?;

        Ok(ApiKeyAuth(Principal {
            api_key_id: api_key.id,
            app_name: api_key.app_name,
        }))
    }
}
