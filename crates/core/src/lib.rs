//! Domain logic for the reporter backend.
//!
//! Everything in this crate is free of I/O: field validation and mapping,
//! relation merging, domain enums, and the shared error taxonomy. The
//! persistence and HTTP crates build on top of it.

pub mod api_keys;
pub mod error;
pub mod fields;
pub mod hashing;
pub mod platform;
pub mod policy;
pub mod relations;
pub mod storage;
pub mod types;
