pub mod country_code;
pub mod files;
pub mod form;
pub mod health;
pub mod onboarding;
pub mod onboarding_step;
pub mod policy;
pub mod study;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /country-codes                  list, create
/// /country-codes/{id}             get, update, delete
///
/// /policies                       list (?type=), create
/// /policies/{id}                  get, update, delete
///
/// /onboarding-steps               list, create
/// /onboarding-steps/{id}          get, update, delete
///
/// /forms                          list, create
/// /forms/{id}                     get, update, delete
///
/// /onboardings                    list, create
/// /onboardings/{id}               get, update (merges steps), delete
///
/// /studies                        list, create
/// /studies/{id}                   get, update (merges relations), delete
///
/// /files/upload-url               signed PUT URL (POST)
/// /files/download-url             signed GET URL (GET)
/// ```
///
/// Reads are public; every mutation and both file routes require the
/// `X-API-KEY` header.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/country-codes", country_code::router())
        .nest("/policies", policy::router())
        .nest("/onboarding-steps", onboarding_step::router())
        .nest("/forms", form::router())
        .nest("/onboardings", onboarding::router())
        .nest("/studies", study::router())
        .nest("/files", files::router())
}
