//! Handlers for `/files`: signed URLs for direct-to-storage transfers.

use std::time::Duration;

use axum::extract::{Query, State};
use axum::Json;
use reporter_core::storage::{upload_key, validate_content_type, validate_object_key};

use crate::dto::{DownloadUrlParams, DownloadUrlResponse, UploadUrlRequest, UploadUrlResponse};
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::api_key::ApiKeyAuth;
use crate::state::AppState;

/// POST /api/v1/files/upload-url
pub async fn upload_url(
    State(state): State<AppState>,
    ApiKeyAuth(principal): ApiKeyAuth,
    ValidatedJson(input): ValidatedJson<UploadUrlRequest>,
) -> AppResult<Json<UploadUrlResponse>> {
    validate_content_type(&input.content_type)?;
    let key = upload_key(&input.file_name)?;
    let ttl = state.config.storage.signed_url_ttl_secs;

    let url = state
        .storage
        .upload_url(&key, &input.content_type, Duration::from_secs(ttl))
        .await?;

    tracing::info!(key = %key, app = %principal.app_name, "Upload URL issued");
    Ok(Json(UploadUrlResponse {
        key,
        url,
        expires_in: ttl,
    }))
}

/// GET /api/v1/files/download-url?key=
pub async fn download_url(
    State(state): State<AppState>,
    ApiKeyAuth(_principal): ApiKeyAuth,
    Query(params): Query<DownloadUrlParams>,
) -> AppResult<Json<DownloadUrlResponse>> {
    validate_object_key(&params.key)?;
    let ttl = state.config.storage.signed_url_ttl_secs;

    let url = state
        .storage
        .download_url(&params.key, Duration::from_secs(ttl))
        .await?;

    Ok(Json(DownloadUrlResponse {
        url,
        expires_in: ttl,
    }))
}
