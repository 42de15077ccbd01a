//! Premium entitlement model.

use dorama_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `premium_grants` table.
///
/// Written by the billing collaborator; this engine only reads grants to
/// decide whether the daily limit applies.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PremiumGrant {
    pub id: DbId,
    pub user_id: DbId,
    pub source: String,
    pub starts_at: Timestamp,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}
