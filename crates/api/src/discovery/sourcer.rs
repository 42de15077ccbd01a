//! Candidate sourcer: which drama ids go into a user's swipe deck.
//!
//! Pulls a pool of ids from the catalog's popular-discover query, then runs
//! the pure pool operations from `dorama_core::discovery`: dedupe, exclusion
//! subtraction, fallback substitution, uniform shuffle, truncate.
//!
//! The external catalog is treated as unreliable. A failed page shrinks the
//! pool and is skipped; a fully failed (or fully excluded) live pool is
//! replaced by the hand-curated fallback pool. The operation never raises an
//! upstream failure to the caller -- the worst case is an empty result when
//! every fallback title is also excluded for this user.

use std::collections::HashSet;

use futures::future::join_all;
use rand::Rng;
use sqlx::PgPool;

use dorama_catalog::CatalogClient;
use dorama_core::discovery::{
    dedupe_ids, remove_excluded, shuffled_take, DISCOVER_PAGE_COUNT, FALLBACK_DRAMA_IDS,
};
use dorama_core::types::{DbId, DramaId};

use super::exclusion::ExclusionResolver;

/// Deck candidate assembly over the catalog client and the exclusion set.
pub struct CandidateSourcer;

impl CandidateSourcer {
    /// Up to `limit` drama ids the user may be shown, uniformly shuffled.
    ///
    /// Infallible by design: catalog failures shrink the live pool (worst
    /// case to the fallback pool) and an exclusion read failure degrades to
    /// an empty exclusion set. Both degradations are logged.
    pub async fn candidates(
        pool: &PgPool,
        catalog: &CatalogClient,
        user_id: DbId,
        limit: i64,
    ) -> Vec<DramaId> {
        let excluded = match ExclusionResolver::excluded_ids(pool, user_id).await {
            Ok(set) => set,
            Err(e) => {
                // A user may briefly resee a listed or skipped title; that
                // beats returning an error for a browse feature.
                tracing::error!(user_id, error = %e, "Exclusion read failed, sourcing without exclusions");
                HashSet::new()
            }
        };

        let live = Self::fetch_live_pool(catalog).await;
        let mut rng = rand::rng();
        let ids = Self::select(live, &excluded, limit.max(0) as usize, &mut rng);

        tracing::debug!(user_id, count = ids.len(), excluded = excluded.len(), "Candidates sourced");
        ids
    }

    /// Fetch the configured number of popular-discover pages concurrently,
    /// concatenating results in page order. Individual page failures are
    /// logged and skipped so one bad page never aborts the run.
    async fn fetch_live_pool(catalog: &CatalogClient) -> Vec<DramaId> {
        let fetches = (1..=DISCOVER_PAGE_COUNT)
            .map(|page| async move { (page, catalog.discover_page(page).await) });

        let mut pool = Vec::new();
        for (page, result) in join_all(fetches).await {
            match result {
                Ok(result) => pool.extend(result.ids()),
                Err(e) => {
                    tracing::warn!(page, error = %e, "Discover page failed, skipping");
                }
            }
        }
        pool
    }

    /// Pure selection pipeline: dedupe, subtract exclusions, fall back when
    /// empty, shuffle, truncate.
    fn select<R: Rng>(
        live: Vec<DramaId>,
        excluded: &HashSet<DramaId>,
        limit: usize,
        rng: &mut R,
    ) -> Vec<DramaId> {
        let eligible = remove_excluded(dedupe_ids(live), excluded);

        let pool = if eligible.is_empty() {
            tracing::info!("Live candidate pool exhausted, substituting fallback pool");
            remove_excluded(FALLBACK_DRAMA_IDS.to_vec(), excluded)
        } else {
            eligible
        };

        shuffled_take(pool, limit, rng)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
