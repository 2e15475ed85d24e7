//! Route definitions for the `/files` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

/// Routes mounted at `/files`. Both require an API key.
///
/// ```text
/// POST   /upload-url          -> upload_url
/// GET    /download-url?key=   -> download_url
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload-url", post(files::upload_url))
        .route("/download-url", get(files::download_url))
}
