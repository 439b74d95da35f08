//! Field rules for tyrant entries.
//!
//! Shared by admin create/update and by submission promotion so a promoted
//! submission always satisfies the same constraints as a hand-made entry.

use crate::error::CoreError;

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_TITLE_LENGTH: usize = 300;
pub const MIN_DESCRIPTION_LENGTH: usize = 10;
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;
pub const MAX_EVIDENCE_URLS: usize = 20;

/// Validate a display name: 2..=200 characters after trimming.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    validate_length("Name", name, MIN_NAME_LENGTH, MAX_NAME_LENGTH)
}

/// Validate a title or position: non-blank, bounded.
pub fn validate_title(field: &str, title: &str) -> Result<(), CoreError> {
    validate_length(field, title, 1, MAX_TITLE_LENGTH)
}

/// Validate an entry description (at least 10 characters).
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    validate_length(
        "Description",
        description,
        MIN_DESCRIPTION_LENGTH,
        MAX_DESCRIPTION_LENGTH,
    )
}

/// Validate that a reference looks like an absolute http(s) URL.
pub fn validate_url(url: &str) -> Result<(), CoreError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !url.chars().any(char::is_whitespace) => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "'{url}' is not an absolute http(s) URL"
        ))),
    }
}

/// Validate the evidence URL list attached to an entry.
pub fn validate_evidence_urls(urls: &[String]) -> Result<(), CoreError> {
    if urls.len() > MAX_EVIDENCE_URLS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_EVIDENCE_URLS} evidence references are allowed (got {})",
            urls.len()
        )));
    }
    urls.iter().try_for_each(|u| validate_url(u))
}

/// Shared trimmed-length check. Lengths count characters, not bytes.
pub(crate) fn validate_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), CoreError> {
    let len = value.trim().chars().count();
    if len < min {
        return Err(CoreError::Validation(format!(
            "{field} must be at least {min} characters (got {len})"
        )));
    }
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters (got {len})"
        )));
    }
    Ok(())
}
