//! Repository for the `premium_grants` table (read-only to this engine).

use dorama_core::types::{DbId, Timestamp};
use sqlx::PgPool;

/// Provides the premium entitlement check.
pub struct PremiumRepo;

impl PremiumRepo {
    /// Whether the user holds a grant that covers `now`.
    pub async fn has_active_grant(
        pool: &PgPool,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM premium_grants
                 WHERE user_id = $1 AND starts_at <= $2 AND expires_at > $2
             )",
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
