//! Repository for the `skipped_dramas` table.

use dorama_core::types::{DbId, DramaId, Timestamp};
use sqlx::PgPool;

use crate::models::skip::SkippedDrama;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, drama_id, skipped_at, expires_at, created_at";

/// Provides upsert, active-set, and purge operations for skip suppression.
pub struct SkipRepo;

impl SkipRepo {
    /// Record a skip, refreshing the suppression window on repeat.
    ///
    /// Idempotent: a second skip of the same drama updates `skipped_at` and
    /// `expires_at` on the existing row instead of inserting a duplicate.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        drama_id: DramaId,
        skipped_at: Timestamp,
        expires_at: Timestamp,
    ) -> Result<SkippedDrama, sqlx::Error> {
        let query = format!(
            "INSERT INTO skipped_dramas (user_id, drama_id, skipped_at, expires_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, drama_id) DO UPDATE
             SET skipped_at = EXCLUDED.skipped_at,
                 expires_at = EXCLUDED.expires_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SkippedDrama>(&query)
            .bind(user_id)
            .bind(drama_id)
            .bind(skipped_at)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Drama ids with a still-active suppression window for this user.
    ///
    /// Expiry filtering happens here; rows past their window are simply not
    /// returned, no purge required.
    pub async fn active_drama_ids(
        pool: &PgPool,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<Vec<DramaId>, sqlx::Error> {
        let rows: Vec<(DramaId,)> = sqlx::query_as(
            "SELECT drama_id FROM skipped_dramas
             WHERE user_id = $1 AND expires_at >= $2",
        )
        .bind(user_id)
        .bind(now)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Find the skip row for `(user_id, drama_id)`, active or expired.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        drama_id: DramaId,
    ) -> Result<Option<SkippedDrama>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skipped_dramas
             WHERE user_id = $1 AND drama_id = $2"
        );
        sqlx::query_as::<_, SkippedDrama>(&query)
            .bind(user_id)
            .bind(drama_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete all entries whose window ended before `now`. Returns the count
    /// of deleted rows. Storage hygiene only; exclusion queries already
    /// filter by expiry.
    pub async fn purge_expired(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skipped_dramas WHERE expires_at < $1")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
