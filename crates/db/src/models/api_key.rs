//! API key model.

use reporter_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `api_keys` table.
///
/// Only the SHA-256 digest of the key is stored.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ApiKey {
    pub id: DbId,
    pub app_name: String,
    pub key_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for registering a new API key.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub app_name: String,
    pub key_hash: String,
}
