//! Route definitions for the `/studies` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::study;
use crate::state::AppState;

/// Routes mounted at `/studies`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (API key)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update (API key)
/// DELETE /{id}    -> delete (API key)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(study::list).post(study::create))
        .route(
            "/{id}",
            get(study::get_by_id)
                .put(study::update)
                .delete(study::delete),
        )
}
