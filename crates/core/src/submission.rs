//! Submission status constants and validation.
//!
//! A submission is a public report awaiting moderation. Reviews are one-shot:
//! `pending` moves to `approved` or `rejected`, and both are terminal.

use crate::error::CoreError;
use crate::tyrant::validate_length;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly submitted report.
pub const STATUS_PENDING: &str = "pending";
/// Report accepted and promoted into a tyrant entry.
pub const STATUS_APPROVED: &str = "approved";
/// Report declined by a moderator.
pub const STATUS_REJECTED: &str = "rejected";

/// All valid submission statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

pub const MIN_DESCRIPTION_LENGTH: usize = 20;
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;
pub const MAX_NOTES_LENGTH: usize = 5_000;
pub const MAX_EVIDENCE_FILES: usize = 10;
pub const MAX_EMAIL_LENGTH: usize = 254;

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Returns the set of statuses that `from_status` may transition to.
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING => &[STATUS_APPROVED, STATUS_REJECTED],
        _ => &[],
    }
}

/// Validate that a status transition from `current` to `next` is allowed.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    if valid_transitions(current).contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move submission from '{current}' to '{next}'"
        )))
    }
}

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid submission status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate the report description (at least 20 characters).
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    validate_length(
        "Description",
        description,
        MIN_DESCRIPTION_LENGTH,
        MAX_DESCRIPTION_LENGTH,
    )
}

/// Validate optional moderator notes.
pub fn validate_notes(notes: &str) -> Result<(), CoreError> {
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err(CoreError::Validation(format!(
            "Moderator notes exceed maximum length of {MAX_NOTES_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Loose shape check for the optional reporter contact address.
///
/// Deliverability is not our problem; this only rejects obvious garbage.
pub fn validate_contact_email(email: &str) -> Result<(), CoreError> {
    let invalid = || CoreError::Validation(format!("'{email}' is not a valid email address"));

    if email.len() > MAX_EMAIL_LENGTH || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(invalid());
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }
    Ok(())
}

/// Validate the number of attached evidence files.
pub fn validate_evidence_count(count: usize) -> Result<(), CoreError> {
    if count > MAX_EVIDENCE_FILES {
        return Err(CoreError::Validation(format!(
            "At most {MAX_EVIDENCE_FILES} evidence files are allowed (got {count})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
