//! Tracking-list membership models and DTOs.

use dorama_core::types::{DbId, DramaId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `watchlist_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WatchlistEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub drama_id: DramaId,
    pub status: String,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub rating: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a drama to a list.
///
/// The metadata fields carry whatever the client had hydrated at swipe time;
/// all of them may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWatchlistEntry {
    pub drama_id: DramaId,
    pub status: Option<String>,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub rating: Option<f64>,
}
