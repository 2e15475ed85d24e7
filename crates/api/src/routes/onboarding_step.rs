//! Route definitions for the `/onboarding-steps` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::onboarding_step;
use crate::state::AppState;

/// Routes mounted at `/onboarding-steps`.
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
        .route("/", get(onboarding_step::list).post(onboarding_step::create))
        .route(
            "/{id}",
            get(onboarding_step::get_by_id)
                .put(onboarding_step::update)
                .delete(onboarding_step::delete),
        )
}
