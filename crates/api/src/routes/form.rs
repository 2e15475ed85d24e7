//! Route definitions for the `/forms` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::form;
use crate::state::AppState;

/// Routes mounted at `/forms`.
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
        .route("/", get(form::list).post(form::create))
        .route(
            "/{id}",
            get(form::get_by_id)
                .put(form::update)
                .delete(form::delete),
        )
}
