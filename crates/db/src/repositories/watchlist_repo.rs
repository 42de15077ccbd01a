//! Repository for the `watchlist_entries` table.
//!
//! The table belongs to the list feature; the discovery engine reads it for
//! permanent exclusion and appends entries on accept swipes.

use dorama_core::types::{DbId, DramaId};
use sqlx::PgPool;

use crate::models::watchlist::{CreateWatchlistEntry, WatchlistEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, drama_id, status, title, poster_path, rating, \
                        created_at, updated_at";

/// Provides the exclusion read and the add-on-accept write.
pub struct WatchlistRepo;

impl WatchlistRepo {
    /// Insert an entry, updating status/metadata if the drama is already on
    /// the user's list. Accepting a drama twice is not an error.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        status: &str,
        input: &CreateWatchlistEntry,
    ) -> Result<WatchlistEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO watchlist_entries (user_id, drama_id, status, title, poster_path, rating)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id, drama_id) DO UPDATE
             SET status      = EXCLUDED.status,
                 title       = COALESCE(EXCLUDED.title, watchlist_entries.title),
                 poster_path = COALESCE(EXCLUDED.poster_path, watchlist_entries.poster_path),
                 rating      = COALESCE(EXCLUDED.rating, watchlist_entries.rating),
                 updated_at  = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WatchlistEntry>(&query)
            .bind(user_id)
            .bind(input.drama_id)
            .bind(status)
            .bind(&input.title)
            .bind(&input.poster_path)
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }

    /// Every drama id on any of the user's lists, regardless of status.
    ///
    /// Membership excludes a drama from discovery permanently; there is no
    /// expiry on this set.
    pub async fn drama_ids_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DramaId>, sqlx::Error> {
        let rows: Vec<(DramaId,)> =
            sqlx::query_as("SELECT drama_id FROM watchlist_entries WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
