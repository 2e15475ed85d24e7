//! API key generation and hashing.
//!
//! Keys are handed to client apps once and only their digest is stored.
//! The `X-API-KEY` header is hashed with [`hash_api_key`] and looked up by
//! digest.

use rand::Rng;

/// Name of the request header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Length of a generated API key (alphanumeric characters).
pub const KEY_LENGTH: usize = 48;

/// Generate a new random alphanumeric API key.
pub fn generate_api_key() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(KEY_LENGTH)
        .map(char::from)
        .collect()
}

/// Compute the stored digest of a plaintext API key.
pub fn hash_api_key(key: &str) -> String {
    crate::hashing::sha256_hex(key.as_bytes())
}
