//! Repository for the `swipe_quotas` table.

use chrono::NaiveDate;
use dorama_core::types::DbId;
use sqlx::PgPool;

use crate::models::quota::SwipeQuota;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, quota_date, swipes_used, daily_limit, is_premium, \
                        created_at, updated_at";

/// Provides the atomic consume operation and reads for daily swipe quotas.
pub struct QuotaRepo;

impl QuotaRepo {
    /// Atomically consume one swipe for `(user_id, day)`.
    ///
    /// A single conditional upsert performs the read-check-increment so two
    /// near-simultaneous swipes (multi-device) can never both slip past the
    /// limit:
    ///
    /// - No row yet: the row is created lazily with `swipes_used = 1` and
    ///   `daily_limit = default_limit` (a first swipe is always grantable
    ///   because `daily_limit > 0`).
    /// - Row exists: the counter is incremented only when the user is
    ///   premium or `swipes_used < daily_limit`.
    ///
    /// Returns the updated row on grant, or `None` when the attempt was
    /// denied (the counter is left untouched).
    pub async fn check_and_consume(
        pool: &PgPool,
        user_id: DbId,
        day: NaiveDate,
        default_limit: i32,
        is_premium: bool,
    ) -> Result<Option<SwipeQuota>, sqlx::Error> {
        let query = format!(
            "INSERT INTO swipe_quotas (user_id, quota_date, swipes_used, daily_limit, is_premium)
             VALUES ($1, $2, 1, $3, $4)
             ON CONFLICT (user_id, quota_date) DO UPDATE
             SET swipes_used = swipe_quotas.swipes_used + 1,
                 is_premium  = EXCLUDED.is_premium,
                 updated_at  = NOW()
             WHERE ($4 OR swipe_quotas.swipes_used < swipe_quotas.daily_limit)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SwipeQuota>(&query)
            .bind(user_id)
            .bind(day)
            .bind(default_limit)
            .bind(is_premium)
            .fetch_optional(pool)
            .await
    }

    /// Find the quota row for `(user_id, day)` without mutating it.
    ///
    /// Returns `None` when the user has not swiped that day (the row is only
    /// created on the first consume).
    pub async fn find_for_day(
        pool: &PgPool,
        user_id: DbId,
        day: NaiveDate,
    ) -> Result<Option<SwipeQuota>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM swipe_quotas
             WHERE user_id = $1 AND quota_date = $2"
        );
        sqlx::query_as::<_, SwipeQuota>(&query)
            .bind(user_id)
            .bind(day)
            .fetch_optional(pool)
            .await
    }
}
