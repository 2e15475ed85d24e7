use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reporter_core::error::CoreError;
use serde::Serialize;

use crate::storage::StorageError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the uniform JSON error body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `reporter_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The object storage backend refused or failed a request.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A bad request with a human-readable message (e.g. malformed JSON).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    /// Reason phrase of `status_code`.
    pub error: &'static str,
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// HTTP status and client-facing message for this error.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, core.to_string()),
                CoreError::Validation(messages) => (StatusCode::BAD_REQUEST, messages.join(";")),
                CoreError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Storage(err) => {
                tracing::error!(error = %err, "Object storage error");
                (StatusCode::BAD_GATEWAY, "Object storage is unavailable".to_string())
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = ErrorBody {
            status_code: status.as_u16(),
            message,
            error: status.canonical_reason().unwrap_or("Error"),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_and_message(err: AppError) -> (u16, String) {
        let (status, message) = err.status_and_message();
        (status.as_u16(), message)
    }

    #[test]
    fn validation_messages_are_joined_with_semicolons() {
        let err = AppError::Core(CoreError::Validation(vec![
            "label must be a string".into(),
            "Options cannot be empty".into(),
        ]));
        assert_eq!(
            status_and_message(err),
            (400, "label must be a string;Options cannot be empty".to_string())
        );
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = AppError::Core(CoreError::NotFound { entity: "Country Code" });
        assert_eq!(status_and_message(err), (404, "Country Code not found".to_string()));
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let err = AppError::Core(CoreError::Internal("connection reset".into()));
        assert_eq!(status_and_message(err), (500, INTERNAL_MESSAGE.to_string()));
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(status_and_message(err).0, 404);
    }

    #[test]
    fn storage_errors_map_to_bad_gateway() {
        let err = AppError::Storage(StorageError::Presign("timeout".into()));
        assert_eq!(status_and_message(err).0, 502);
    }
}
