pub mod country_code;
pub mod files;
pub mod form;
pub mod onboarding;
pub mod onboarding_step;
pub mod policy;
pub mod study;
