//! Skip-suppression model.

use dorama_core::types::{DbId, DramaId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `skipped_dramas` table.
///
/// At most one row exists per `(user_id, drama_id)`; re-skipping refreshes
/// `skipped_at`/`expires_at` in place.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SkippedDrama {
    pub id: DbId,
    pub user_id: DbId,
    pub drama_id: DramaId,
    pub skipped_at: Timestamp,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}
