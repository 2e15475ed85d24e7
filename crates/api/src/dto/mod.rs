//! Response DTOs and the mappers that build them.
//!
//! Every entity has a `From<&Entity>` mapper. Aggregates descend one way
//! only (study → country codes, policies, onboarding; onboarding → steps,
//! form; form → fields) and map relations that are already loaded.

pub mod country_code;
pub mod file;
pub mod form;
pub mod onboarding;
pub mod onboarding_step;
pub mod policy;
pub mod study;

pub use country_code::CountryCodeDto;
pub use file::{DownloadUrlParams, DownloadUrlResponse, UploadUrlRequest, UploadUrlResponse};
pub use form::FormDto;
pub use onboarding::OnboardingDto;
pub use onboarding_step::OnboardingStepDto;
pub use policy::PolicyDto;
pub use study::StudyDto;

/// Map a slice of entities.
pub fn map_all<'a, E, D>(entities: &'a [E]) -> Vec<D>
where
    D: From<&'a E>,
{
    entities.iter().map(D::from).collect()
}

/// Map an optional single lookup; `None` stays `None`.
pub fn map_optional<'a, E, D>(entity: Option<&'a E>) -> Option<D>
where
    D: From<&'a E>,
{
    entity.map(D::from)
}
