//! Exclusion resolver: which dramas a user must never be shown again.
//!
//! The exclusion set is the union of two sources with different lifetimes:
//! watchlist membership (permanent, any list, any status) and skip entries
//! whose suppression window still covers `now`. Expired skips are inert
//! here without any purge; the purge operation exists for storage hygiene
//! only.

use std::collections::HashSet;

use sqlx::PgPool;

use dorama_core::discovery::skip_expiry;
use dorama_core::types::{DbId, DramaId};
use dorama_db::models::skip::SkippedDrama;
use dorama_db::repositories::{SkipRepo, WatchlistRepo};

/// Exclusion-set queries and skip bookkeeping over `watchlist_entries` and
/// `skipped_dramas`.
pub struct ExclusionResolver;

impl ExclusionResolver {
    /// Every drama id the user must not see: watchlisted ids plus ids with
    /// an active skip window.
    pub async fn excluded_ids(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<HashSet<DramaId>, sqlx::Error> {
        let now = chrono::Utc::now();

        let listed = WatchlistRepo::drama_ids_for_user(pool, user_id).await?;
        let skipped = SkipRepo::active_drama_ids(pool, user_id, now).await?;

        let mut excluded: HashSet<DramaId> = listed.into_iter().collect();
        excluded.extend(skipped);
        Ok(excluded)
    }

    /// Record a skip, starting (or restarting) the 7-day suppression window.
    ///
    /// Idempotent: re-skipping a drama refreshes `expires_at` on the
    /// existing row rather than inserting a duplicate.
    pub async fn record_skip(
        pool: &PgPool,
        user_id: DbId,
        drama_id: DramaId,
    ) -> Result<SkippedDrama, sqlx::Error> {
        let now = chrono::Utc::now();
        let entry = SkipRepo::upsert(pool, user_id, drama_id, now, skip_expiry(now)).await?;
        tracing::debug!(user_id, drama_id, expires_at = %entry.expires_at, "Skip recorded");
        Ok(entry)
    }

    /// Delete every skip entry whose window has already closed.
    ///
    /// Safe to run at any cadence; never required for exclusion correctness.
    pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let deleted = SkipRepo::purge_expired(pool, chrono::Utc::now()).await?;
        if deleted > 0 {
            tracing::info!(deleted, "Purged expired skip entries");
        }
        Ok(deleted)
    }
}
