//! Route definitions for the `/country-codes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::country_code;
use crate::state::AppState;

/// Routes mounted at `/country-codes`.
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
        .route("/", get(country_code::list).post(country_code::create))
        .route(
            "/{id}",
            get(country_code::get_by_id)
                .put(country_code::update)
                .delete(country_code::delete),
        )
}
