use crate::types::DbId;

/// Domain-level error shared by the database and HTTP layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A tyrant, vote, submission or admin that does not exist (or is not
    /// visible to the caller).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request is well-formed but clashes with current state, e.g.
    /// reviewing an already reviewed submission.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] on the given entity.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}
