//! Repository for the `submissions` table.

use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use tyrantcam_core::error::CoreError;
use tyrantcam_core::submission::{self, STATUS_APPROVED, STATUS_REJECTED};
use tyrantcam_core::types::DbId;

use crate::models::submission::{CreateSubmission, Submission};
use crate::models::tyrant::{CreateTyrant, Tyrant};
use crate::repositories::TyrantRepo;

/// Column list for `submissions` queries.
const COLUMNS: &str = "\
    id, name, title, position, category, description, evidence_files, \
    reporter_email, status, moderator_notes, reviewed_at, reviewed_by, \
    promoted_tyrant_id, created_at, updated_at";

/// Failure modes of a moderation decision.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// Missing submission, or a transition out of a terminal status.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Provides queue and moderation operations for submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Create a new pending submission, returning the full row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubmission,
    ) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions \
                (name, title, position, category, description, evidence_files, reporter_email) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(input.name.trim())
            .bind(input.title.trim())
            .bind(input.position.as_deref().map(str::trim))
            .bind(&input.category)
            .bind(&input.description)
            .bind(Json(&input.evidence_files))
            .bind(&input.reporter_email)
            .fetch_one(pool)
            .await
    }

    /// Find a submission by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List submissions with an optional status filter, newest first.
    pub async fn list_filtered(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM submissions \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Reject a pending submission.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
        notes: Option<&str>,
    ) -> Result<Submission, ReviewError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock_for_review(&mut *tx, id).await?;
        submission::validate_transition(&current.status, STATUS_REJECTED)?;

        let query = format!(
            "UPDATE submissions SET \
                status = $2, moderator_notes = $3, reviewed_at = NOW(), reviewed_by = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(STATUS_REJECTED)
            .bind(notes)
            .bind(reviewer_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Approve a pending submission and promote it into a tyrant entry.
    ///
    /// The status change and the new tyrant row commit together; a
    /// submission can be promoted at most once. Evidence file URLs become the
    /// entry's evidence list, and the first image file (if any) its picture.
    pub async fn approve_and_promote(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
        notes: Option<&str>,
        publish: bool,
    ) -> Result<(Submission, Tyrant), ReviewError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock_for_review(&mut *tx, id).await?;
        submission::validate_transition(&current.status, STATUS_APPROVED)?;

        let tyrant = TyrantRepo::create(&mut *tx, &promotion_input(&current, publish)).await?;

        let query = format!(
            "UPDATE submissions SET \
                status = $2, moderator_notes = $3, reviewed_at = NOW(), reviewed_by = $4, \
                promoted_tyrant_id = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(STATUS_APPROVED)
            .bind(notes)
            .bind(reviewer_id)
            .bind(tyrant.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((updated, tyrant))
    }

    /// Row-lock a submission so two moderators cannot review it at once.
    async fn lock_for_review(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Submission, ReviewError> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| CoreError::not_found("Submission", id).into())
    }
}

/// Map a submission onto the fields of a new tyrant entry.
fn promotion_input(submission: &Submission, publish: bool) -> CreateTyrant {
    let files = &submission.evidence_files.0;
    let image_url = files
        .iter()
        .find(|f| {
            f.content_type
                .as_deref()
                .is_some_and(|ct| ct.starts_with("image/"))
        })
        .map(|f| f.url.clone());

    CreateTyrant {
        name: submission.name.clone(),
        title: submission.title.clone(),
        position: submission
            .position
            .clone()
            .unwrap_or_else(|| submission.title.clone()),
        category: submission.category.clone(),
        description: submission.description.clone(),
        image_url,
        evidence_urls: files.iter().map(|f| f.url.clone()).collect(),
        is_published: publish,
    }
}
