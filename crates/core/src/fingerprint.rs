//! Visitor fingerprints for the vote ledger.
//!
//! A fingerprint is the lowercase hex SHA-256 digest of some caller-chosen
//! visitor identifier (the HTTP layer uses the client address plus a server
//! secret). The ledger only cares that it is exactly 64 hex characters; it
//! never sees the raw identifier.

use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Length of a hex-encoded SHA-256 digest.
pub const FINGERPRINT_LEN: usize = 64;

/// Default look-back window for the "already voted recently" signal.
pub const DEFAULT_VOTE_WINDOW_HOURS: i32 = 24;

/// Longest window a caller may ask about (one year).
pub const MAX_VOTE_WINDOW_HOURS: i32 = 24 * 365;

/// Validate a fingerprint and return its canonical (lowercase) form.
///
/// Uppercase hex is accepted and folded so the same digest cannot slip past
/// the `(tyrant_id, fingerprint)` unique constraint twice.
pub fn normalize_fingerprint(fingerprint: &str) -> Result<String, CoreError> {
    if fingerprint.len() != FINGERPRINT_LEN {
        return Err(CoreError::Validation(format!(
            "Fingerprint must be exactly {FINGERPRINT_LEN} hex characters (got {})",
            fingerprint.len()
        )));
    }
    if !fingerprint.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CoreError::Validation(
            "Fingerprint must contain only hex characters".into(),
        ));
    }
    Ok(fingerprint.to_ascii_lowercase())
}

/// Derive a fingerprint from a visitor identifier and a server-side salt.
///
/// The salt is appended to the identifier before hashing, so two deployments
/// with different salts produce unrelated fingerprints for the same visitor.
pub fn derive_fingerprint(visitor: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(visitor.as_bytes());
    hasher.update(salt.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Resolve an optional caller-supplied window, falling back to the default.
pub fn resolve_window_hours(window_hours: Option<i32>) -> Result<i32, CoreError> {
    let hours = window_hours.unwrap_or(DEFAULT_VOTE_WINDOW_HOURS);
    if !(1..=MAX_VOTE_WINDOW_HOURS).contains(&hours) {
        return Err(CoreError::Validation(format!(
            "window_hours must be between 1 and {MAX_VOTE_WINDOW_HOURS} (got {hours})"
        )));
    }
    Ok(hours)
}
