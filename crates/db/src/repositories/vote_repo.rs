//! Vote ledger and shame-counter synchronisation.
//!
//! Every write to `votes` happens inside a transaction that also adjusts
//! `tyrants.shame_count`, so no reader can observe a ledger row without the
//! matching counter change (or vice versa).
//!
//! Lock order is always tyrant row first, then vote row. `cast` takes the
//! tyrant lock before inserting; `revoke` resolves the vote's tyrant, locks
//! it, and only then deletes.

use sqlx::PgPool;
use tyrantcam_core::fingerprint::normalize_fingerprint;
use tyrantcam_core::types::DbId;

use crate::models::vote::{CastVote, VoteEvent, VoteRevocation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tyrant_id, fingerprint, created_at, updated_at";

/// Outcomes of ledger writes other than success.
///
/// `DuplicateVote`, `NotFound`, and `Validation` are expected results the
/// caller is meant to branch on; `Storage` is an opaque infrastructure fault.
#[derive(Debug, thiserror::Error)]
pub enum VoteError {
    #[error("A vote from this visitor already exists for tyrant {tyrant_id}")]
    DuplicateVote { tyrant_id: DbId, shame_count: i32 },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Provides the vote ledger operations.
pub struct VoteRepo;

impl VoteRepo {
    /// Record one vote for `tyrant_id` from `fingerprint` and bump the counter.
    ///
    /// Only published tyrants accept votes; drafts report `NotFound`. A
    /// second vote for the same pair, concurrent or not, fails with
    /// `DuplicateVote` and leaves the counter untouched.
    pub async fn cast(
        pool: &PgPool,
        tyrant_id: DbId,
        fingerprint: &str,
    ) -> Result<CastVote, VoteError> {
        let fingerprint = normalize_fingerprint(fingerprint)
            .map_err(|e| VoteError::Validation(e.to_string()))?;

        let mut tx = pool.begin().await?;

        let locked: Option<(i32,)> = sqlx::query_as(
            "SELECT shame_count FROM tyrants WHERE id = $1 AND is_published FOR UPDATE",
        )
        .bind(tyrant_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((current_count,)) = locked else {
            return Err(VoteError::NotFound {
                entity: "Tyrant",
                id: tyrant_id,
            });
        };

        let insert = format!(
            "INSERT INTO votes (tyrant_id, fingerprint) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_votes_tyrant_fingerprint DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let vote = sqlx::query_as::<_, VoteEvent>(&insert)
            .bind(tyrant_id)
            .bind(&fingerprint)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(vote) = vote else {
            // Dropping the transaction rolls it back; nothing was written.
            return Err(VoteError::DuplicateVote {
                tyrant_id,
                shame_count: current_count,
            });
        };

        let (shame_count,): (i32,) = sqlx::query_as(
            "UPDATE tyrants SET shame_count = shame_count + 1 WHERE id = $1 RETURNING shame_count",
        )
        .bind(tyrant_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CastVote { vote, shame_count })
    }

    /// Delete a vote and decrement its tyrant's counter, floored at zero.
    pub async fn revoke(pool: &PgPool, vote_id: DbId) -> Result<VoteRevocation, VoteError> {
        let not_found = || VoteError::NotFound {
            entity: "Vote",
            id: vote_id,
        };

        let mut tx = pool.begin().await?;

        let owner: Option<(DbId,)> = sqlx::query_as("SELECT tyrant_id FROM votes WHERE id = $1")
            .bind(vote_id)
            .fetch_optional(&mut *tx)
            .await?;
        let (tyrant_id,) = owner.ok_or_else(not_found)?;

        sqlx::query("SELECT id FROM tyrants WHERE id = $1 FOR UPDATE")
            .bind(tyrant_id)
            .execute(&mut *tx)
            .await?;

        // A concurrent revoke may have won between the lookup and the lock;
        // the tyrant_id guard plus RETURNING tells us whether we did.
        let delete =
            format!("DELETE FROM votes WHERE id = $1 AND tyrant_id = $2 RETURNING {COLUMNS}");
        let vote = sqlx::query_as::<_, VoteEvent>(&delete)
            .bind(vote_id)
            .bind(tyrant_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(not_found)?;

        let (shame_count,): (i32,) = sqlx::query_as(
            "UPDATE tyrants SET shame_count = GREATEST(shame_count - 1, 0) \
             WHERE id = $1 RETURNING shame_count",
        )
        .bind(tyrant_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(VoteRevocation { vote, shame_count })
    }

    /// Whether `fingerprint` voted for `tyrant_id` within the last `window_hours`.
    ///
    /// This is a display signal only. The unique constraint, not this check,
    /// is what blocks repeat votes.
    pub async fn has_voted(
        pool: &PgPool,
        tyrant_id: DbId,
        fingerprint: &str,
        window_hours: i32,
    ) -> Result<bool, VoteError> {
        let fingerprint = normalize_fingerprint(fingerprint)
            .map_err(|e| VoteError::Validation(e.to_string()))?;

        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS ( \
                 SELECT 1 FROM votes \
                 WHERE tyrant_id = $1 AND fingerprint = $2 \
                   AND created_at > NOW() - make_interval(hours => $3) \
             )",
        )
        .bind(tyrant_id)
        .bind(&fingerprint)
        .bind(window_hours)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Find a vote by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VoteEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM votes WHERE id = $1");
        sqlx::query_as::<_, VoteEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the ledger rows for one tyrant, newest first.
    pub async fn list_for_tyrant(
        pool: &PgPool,
        tyrant_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VoteEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM votes WHERE tyrant_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, VoteEvent>(&query)
            .bind(tyrant_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count live votes for one tyrant straight from the ledger.
    pub async fn count_for_tyrant(pool: &PgPool, tyrant_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM votes WHERE tyrant_id = $1")
            .bind(tyrant_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
