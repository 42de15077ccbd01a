//! Daily swipe-quota ledger model.

use chrono::NaiveDate;
use dorama_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `swipe_quotas` table.
///
/// One row per user per UTC calendar day. `is_premium` is the premium state
/// observed on the most recent consume, kept for observability; the
/// authoritative premium check happens against `premium_grants` at call time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SwipeQuota {
    pub id: DbId,
    pub user_id: DbId,
    pub quota_date: NaiveDate,
    pub swipes_used: i32,
    pub daily_limit: i32,
    pub is_premium: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
