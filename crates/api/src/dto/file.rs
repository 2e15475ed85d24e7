use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /files/upload-url`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    #[validate(length(min = 1, message = "fileName should not be empty"))]
    pub file_name: String,
    #[validate(length(min = 1, message = "contentType should not be empty"))]
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    /// Object key to reference the upload by afterwards.
    pub key: String,
    pub url: String,
    pub expires_in: u64,
}

/// Query of `GET /files/download-url`.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadUrlParams {
    pub key: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadUrlResponse {
    pub url: String,
    pub expires_in: u64,
}
