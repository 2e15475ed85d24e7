//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - An entity struct (a `FromRow` row struct where the entity maps to one table)
//! - A `Deserialize` + `Validate` create DTO
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) with `apply_to`

pub mod api_key;
pub mod country_code;
pub mod form;
pub mod onboarding;
pub mod onboarding_step;
pub mod policy;
pub mod study;
