//! Vote ledger model and operation results.

use serde::Serialize;
use sqlx::FromRow;
use tyrantcam_core::types::{DbId, Timestamp};

/// A row from the `votes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VoteEvent {
    pub id: DbId,
    pub tyrant_id: DbId,
    pub fingerprint: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of a successful vote: the new ledger row and the counter value
/// committed alongside it.
#[derive(Debug, Clone, Serialize)]
pub struct CastVote {
    pub vote: VoteEvent,
    pub shame_count: i32,
}

/// Result of a revocation: the removed ledger row and the counter value
/// committed alongside its deletion.
#[derive(Debug, Clone, Serialize)]
pub struct VoteRevocation {
    pub vote: VoteEvent,
    pub shame_count: i32,
}
