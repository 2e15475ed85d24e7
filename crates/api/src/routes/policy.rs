//! Route definitions for the `/policies` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::policy;
use crate::state::AppState;

/// Routes mounted at `/policies`.
///
/// ```text
/// GET    /        -> list (optional `?type=`)
/// POST   /        -> create (API key)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update (API key)
/// DELETE /{id}    -> delete (API key)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(policy::list).post(policy::create))
        .route(
            "/{id}",
            get(policy::get_by_id)
                .put(policy::update)
                .delete(policy::delete),
        )
}
