//! Object key naming and limits for signed upload URLs.
//!
//! The storage backend only sees opaque keys; this module decides what they
//! look like so the API layer and any tooling agree on the layout.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::error::CoreError;

/// Prefix under which every client upload is stored.
pub const UPLOAD_PREFIX: &str = "uploads";

/// Default lifetime of a signed URL in seconds.
pub const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 900;

/// Upper bound accepted for a signed URL lifetime (7 days, the S3 limit).
pub const MAX_SIGNED_URL_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Maximum length of the sanitized file name part of a key.
const MAX_FILE_NAME_LEN: usize = 128;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("static regex is valid"));

/// Replace everything outside `[A-Za-z0-9._-]` with `_` and trim the result.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned = UNSAFE_CHARS.replace_all(base.trim(), "_");
    let truncated: String = cleaned.chars().take(MAX_FILE_NAME_LEN).collect();
    truncated.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Build a fresh object key `uploads/{uuid}/{file_name}` for an upload.
pub fn upload_key(file_name: &str) -> Result<String, CoreError> {
    let sanitized = sanitize_file_name(file_name);
    if sanitized.is_empty() {
        return Err(CoreError::validation("fileName must contain at least one valid character"));
    }
    Ok(format!("{UPLOAD_PREFIX}/{}/{sanitized}", Uuid::new_v4()))
}

/// Accept only keys this service could have issued.
pub fn validate_object_key(key: &str) -> Result<(), CoreError> {
    let mut parts = key.splitn(3, '/');
    let valid = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(UPLOAD_PREFIX), Some(id), Some(name))
            if Uuid::parse_str(id).is_ok() && !name.is_empty() && sanitize_file_name(name) == name
    );
    if valid {
        Ok(())
    } else {
        Err(CoreError::validation(format!("Invalid object key '{key}'")))
    }
}

/// Validate a MIME type of the form `type/subtype`.
pub fn validate_content_type(content_type: &str) -> Result<(), CoreError> {
    match content_type.split_once('/') {
        Some((kind, sub)) if !kind.is_empty() && !sub.is_empty() && !content_type.contains(' ') => {
            Ok(())
        }
        _ => Err(CoreError::validation(format!(
            "Invalid content type '{content_type}'"
        ))),
    }
}

/// Clamp a requested TTL into `1..=MAX_SIGNED_URL_TTL_SECS`.
pub fn clamp_ttl(ttl_secs: u64) -> u64 {
    ttl_secs.clamp(1, MAX_SIGNED_URL_TTL_SECS)
}
