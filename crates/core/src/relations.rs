//! Merge rules for many-to-many relations on aggregates.
//!
//! Onboarding steps, study country codes and study policies are updated by
//! sending a list of ids. The ids are resolved in one batch lookup and the
//! result is appended to the existing collection. Nothing is ever removed
//! through this path.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Anything with a stable primary key.
pub trait Identified {
    fn id(&self) -> DbId;
}

/// Message used when none of the requested onboarding steps exist.
pub const NO_STEPS_FOUND: &str = "No Onboarding steps with the given id exist";
/// Message used when none of the requested country codes exist.
pub const NO_COUNTRY_CODES_FOUND: &str = "No Country Codes with the given id exist";
/// Message used when none of the requested policies exist.
pub const NO_POLICIES_FOUND: &str = "No Policies with the given id exist";

/// Append `incoming` to `existing`, dropping anything whose id was already
/// seen. Existing members keep their position; new members keep their input
/// order.
pub fn merge_by_id<T: Identified>(existing: Vec<T>, incoming: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(existing.len() + incoming.len());
    existing
        .into_iter()
        .chain(incoming)
        .filter(|item| seen.insert(item.id()))
        .collect()
}

/// Fail with `BadRequest(message)` when ids were supplied but none resolved.
///
/// A partial resolution is accepted; unknown ids are dropped silently.
pub fn require_resolved<T>(
    requested: &[DbId],
    resolved: Vec<T>,
    message: &str,
) -> Result<Vec<T>, CoreError> {
    if !requested.is_empty() && resolved.is_empty() {
        return Err(CoreError::BadRequest(message.to_string()));
    }
    Ok(resolved)
}

/// Order `resolved` the way the caller listed the ids in `requested`.
///
/// Batch lookups return rows in storage order; the input order is what
/// decides the position of new members.
pub fn order_by_request<T: Identified>(requested: &[DbId], mut resolved: Vec<T>) -> Vec<T> {
    resolved.sort_by_key(|item| {
        requested
            .iter()
            .position(|id| *id == item.id())
            .unwrap_or(usize::MAX)
    });
    resolved
}
