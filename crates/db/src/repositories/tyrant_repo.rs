//! Repository for the `tyrants` table.

use sqlx::{PgExecutor, PgPool};
use tyrantcam_core::category::Category;
use tyrantcam_core::types::DbId;

use crate::models::tyrant::{CreateTyrant, Tyrant, UpdateTyrant};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "\
    id, name, title, position, category, description, image_url, \
    evidence_urls, shame_count, is_published, created_at, updated_at";

/// Provides CRUD and listing operations for tyrant entries.
///
/// `shame_count` is never written here except by
/// [`TyrantRepo::reconcile_shame_counts`]; day-to-day changes go through
/// [`VoteRepo`](super::VoteRepo).
pub struct TyrantRepo;

impl TyrantRepo {
    /// Insert a new tyrant, returning the created row.
    ///
    /// Accepts any executor so submission promotion can run it inside its
    /// own transaction.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateTyrant,
    ) -> Result<Tyrant, sqlx::Error> {
        let query = format!(
            "INSERT INTO tyrants \
                (name, title, position, category, description, image_url, \
                 evidence_urls, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tyrant>(&query)
            .bind(input.name.trim())
            .bind(input.title.trim())
            .bind(input.position.trim())
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.evidence_urls)
            .bind(input.is_published)
            .fetch_one(executor)
            .await
    }

    /// Find a tyrant by ID regardless of publication state.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tyrant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tyrants WHERE id = $1");
        sqlx::query_as::<_, Tyrant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tyrant by ID only if it is published.
    pub async fn find_published_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Tyrant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tyrants WHERE id = $1 AND is_published");
        sqlx::query_as::<_, Tyrant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public listing: published tyrants only, most-shamed first, then newest.
    ///
    /// `id DESC` breaks the remaining ties so pagination is stable.
    pub async fn list_published(
        pool: &PgPool,
        category: Option<Category>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Tyrant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tyrants \
             WHERE is_published AND ($1::text IS NULL OR category = $1) \
             ORDER BY shame_count DESC, created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Tyrant>(&query)
            .bind(category.map(Category::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Admin listing: every tyrant including drafts, newest first.
    pub async fn list_all(
        pool: &PgPool,
        category: Option<Category>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Tyrant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tyrants \
             WHERE ($1::text IS NULL OR category = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Tyrant>(&query)
            .bind(category.map(Category::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a tyrant. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTyrant,
    ) -> Result<Option<Tyrant>, sqlx::Error> {
        let query = format!(
            "UPDATE tyrants SET \
                name = COALESCE(btrim($2), name), \
                title = COALESCE(btrim($3), title), \
                position = COALESCE(btrim($4), position), \
                category = COALESCE($5, category), \
                description = COALESCE($6, description), \
                image_url = COALESCE($7, image_url), \
                evidence_urls = COALESCE($8, evidence_urls) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tyrant>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.title)
            .bind(&input.position)
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.evidence_urls)
            .fetch_optional(pool)
            .await
    }

    /// Set the publication flag. Returns the updated row if found.
    pub async fn set_published(
        pool: &PgPool,
        id: DbId,
        is_published: bool,
    ) -> Result<Option<Tyrant>, sqlx::Error> {
        let query =
            format!("UPDATE tyrants SET is_published = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tyrant>(&query)
            .bind(id)
            .bind(is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tyrant and, by cascade, its votes. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tyrants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute every `shame_count` from the vote ledger.
    ///
    /// All tyrant rows are locked first, which blocks concurrent casts and
    /// revokes for the duration, so the recount cannot race a ledger write.
    /// Returns how many counters were out of sync.
    pub async fn reconcile_shame_counts(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM tyrants ORDER BY id FOR UPDATE")
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(
            "UPDATE tyrants t SET shame_count = live.count \
             FROM ( \
                 SELECT t2.id, COUNT(v.id)::int AS count \
                 FROM tyrants t2 LEFT JOIN votes v ON v.tyrant_id = t2.id \
                 GROUP BY t2.id \
             ) live \
             WHERE t.id = live.id AND t.shame_count <> live.count",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let corrected = result.rows_affected();
        if corrected > 0 {
            tracing::warn!(corrected, "Shame counters were out of sync with the vote ledger");
        }
        Ok(corrected)
    }
}
