//! PostgreSQL repositories.
//!
//! Each repository owns a clone of the pool and implements the matching
//! trait from [`crate::stores`]. Column lists are kept in constants next to
//! the queries that use them.

pub mod api_key_repo;
pub mod country_code_repo;
pub mod form_repo;
pub mod health_repo;
pub mod onboarding_repo;
pub mod onboarding_step_repo;
pub mod policy_repo;
pub mod study_repo;

pub use api_key_repo::ApiKeyRepo;
pub use country_code_repo::CountryCodeRepo;
pub use form_repo::FormRepo;
pub use health_repo::HealthRepo;
pub use onboarding_repo::OnboardingRepo;
pub use onboarding_step_repo::OnboardingStepRepo;
pub use policy_repo::PolicyRepo;
pub use study_repo::StudyRepo;

/// Turn a text column that failed to parse into a decode error.
pub(crate) fn decode_error(column: &str, err: impl std::fmt::Display) -> sqlx::Error {
    sqlx::Error::Decode(format!("invalid value in column {column}: {err}").into())
}
