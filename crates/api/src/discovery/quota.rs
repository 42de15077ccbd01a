//! Daily swipe-quota ledger service.
//!
//! Wraps [`QuotaRepo`] and [`PremiumRepo`] with the business rules from
//! `dorama_core::quota`: lazy row creation, premium bypass, and denial
//! without increment.
//!
//! # Fail-open policy
//!
//! Both the read path ([`QuotaLedger::status`]) and the mutating path
//! ([`QuotaLedger::check_and_consume`]) degrade to **permissive** results
//! when the store is unreachable instead of returning an error. This is a
//! deliberate trade-off, not an oversight: over-granting a free swipe is a
//! low-severity business error, while blocking all discovery because the
//! ledger is down is a high-severity UX failure. Every degraded response is
//! logged at `error` level so operators can see quota enforcement is off.

use sqlx::PgPool;

use dorama_core::quota::{quota_day, QuotaStatus, SwipeOutcome, DEFAULT_DAILY_LIMIT};
use dorama_core::types::DbId;
use dorama_db::repositories::{PremiumRepo, QuotaRepo};

/// Quota accounting over the `swipe_quotas` and `premium_grants` tables.
pub struct QuotaLedger;

impl QuotaLedger {
    /// Current quota snapshot for the user, without consuming anything.
    ///
    /// Used by the client before any swipe occurs; a user who has not swiped
    /// today has no ledger row and gets a fresh full-allowance snapshot.
    pub async fn status(pool: &PgPool, user_id: DbId) -> QuotaStatus {
        let now = chrono::Utc::now();

        let is_premium = match PremiumRepo::has_active_grant(pool, user_id, now).await {
            Ok(premium) => premium,
            Err(e) => {
                tracing::error!(user_id, error = %e, "Premium check failed, degrading to permissive quota status");
                return QuotaStatus::fresh(DEFAULT_DAILY_LIMIT, false);
            }
        };

        match QuotaRepo::find_for_day(pool, user_id, quota_day(now)).await {
            Ok(Some(row)) => QuotaStatus::from_counts(row.swipes_used, row.daily_limit, is_premium),
            Ok(None) => QuotaStatus::fresh(DEFAULT_DAILY_LIMIT, is_premium),
            Err(e) => {
                tracing::error!(user_id, error = %e, "Quota read failed, degrading to permissive quota status");
                QuotaStatus::fresh(DEFAULT_DAILY_LIMIT, is_premium)
            }
        }
    }

    /// Atomically consume one swipe for the user, today.
    ///
    /// Premium users are always granted (the counter still increments for
    /// observability); free users are granted while below the limit. A
    /// denied attempt never increments the counter. Store failures degrade
    /// to a granted outcome per the module-level fail-open policy.
    pub async fn check_and_consume(pool: &PgPool, user_id: DbId) -> SwipeOutcome {
        let now = chrono::Utc::now();
        let day = quota_day(now);

        let is_premium = match PremiumRepo::has_active_grant(pool, user_id, now).await {
            Ok(premium) => premium,
            Err(e) => {
                tracing::error!(user_id, error = %e, "Premium check failed, granting swipe fail-open");
                return Self::fail_open_outcome();
            }
        };

        match QuotaRepo::check_and_consume(pool, user_id, day, DEFAULT_DAILY_LIMIT, is_premium)
            .await
        {
            Ok(Some(row)) => {
                tracing::debug!(
                    user_id,
                    swipes_used = row.swipes_used,
                    daily_limit = row.daily_limit,
                    is_premium,
                    "Swipe granted"
                );
                SwipeOutcome::granted(row.swipes_used, row.daily_limit, is_premium)
            }
            Ok(None) => {
                // Denied: fetch the untouched counters for the response. If
                // that read fails too we still deny, with default counters.
                let (used, limit) = match QuotaRepo::find_for_day(pool, user_id, day).await {
                    Ok(Some(row)) => (row.swipes_used, row.daily_limit),
                    _ => (DEFAULT_DAILY_LIMIT, DEFAULT_DAILY_LIMIT),
                };
                tracing::info!(user_id, swipes_used = used, daily_limit = limit, "Swipe denied, daily limit reached");
                SwipeOutcome::denied(used, limit)
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "Quota consume failed, granting swipe fail-open");
                Self::fail_open_outcome()
            }
        }
    }

    /// The permissive outcome returned when the store is unreachable.
    ///
    /// Reports a fresh free-tier day: the real counters are unknown and the
    /// client only needs `success = true` plus something plausible to show.
    fn fail_open_outcome() -> SwipeOutcome {
        SwipeOutcome::granted(1, DEFAULT_DAILY_LIMIT, false)
    }
}
