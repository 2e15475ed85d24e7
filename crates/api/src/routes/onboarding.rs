//! Route definitions for the `/onboardings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboardings`.
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
        .route("/", get(onboarding::list).post(onboarding::create))
        .route(
            "/{id}",
            get(onboarding::get_by_id)
                .put(onboarding::update)
                .delete(onboarding::delete),
        )
}
