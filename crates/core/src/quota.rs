//! Daily swipe-quota rules and arithmetic (PRD-31).
//!
//! The authoritative counter lives in the `swipe_quotas` table and is
//! mutated atomically by the repository layer; this module holds the shared
//! constants and the pure arithmetic both the server and the client quota
//! snapshot rely on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Free-tier daily swipe allowance, applied when a user's quota row is
/// created lazily on their first swipe of the day.
pub const DEFAULT_DAILY_LIMIT: i32 = 20;

/// Sentinel value for `remaining_swipes` when the user is premium and the
/// limit does not apply.
pub const UNLIMITED_REMAINING: i32 = -1;

/// The ledger day a timestamp falls on.
///
/// Quota rows are keyed by UTC calendar date: every user's counter resets at
/// 00:00 UTC regardless of device time zone, so two devices can never
/// disagree about which row a swipe lands in.
pub fn quota_day(now: Timestamp) -> NaiveDate {
    now.date_naive()
}

/// Whether a user in this quota state may swipe.
///
/// Premium users always may; free users may while the counter is below the
/// limit.
pub fn can_swipe(swipes_used: i32, daily_limit: i32, is_premium: bool) -> bool {
    is_premium || swipes_used < daily_limit
}

/// Swipes left today, or [`UNLIMITED_REMAINING`] for premium users.
///
/// Never negative for free users even if the stored counter somehow exceeds
/// the limit (e.g. after an admin lowered a user's `daily_limit`).
pub fn remaining_swipes(swipes_used: i32, daily_limit: i32, is_premium: bool) -> i32 {
    if is_premium {
        UNLIMITED_REMAINING
    } else {
        (daily_limit - swipes_used).max(0)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Point-in-time view of a user's daily quota.
///
/// Returned by the status endpoint and cached client-side as the session's
/// last quota snapshot; the client's swipe entry guard reads `can_swipe`
/// from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaStatus {
    pub swipes_used: i32,
    pub daily_limit: i32,
    pub remaining_swipes: i32,
    pub can_swipe: bool,
    pub is_premium: bool,
}

impl QuotaStatus {
    /// Build a snapshot from raw counter values.
    pub fn from_counts(swipes_used: i32, daily_limit: i32, is_premium: bool) -> Self {
        Self {
            swipes_used,
            daily_limit,
            remaining_swipes: remaining_swipes(swipes_used, daily_limit, is_premium),
            can_swipe: can_swipe(swipes_used, daily_limit, is_premium),
            is_premium,
        }
    }

    /// Snapshot for a user who has not swiped today (no ledger row yet).
    pub fn fresh(daily_limit: i32, is_premium: bool) -> Self {
        Self::from_counts(0, daily_limit, is_premium)
    }
}

/// Result of one consume attempt against the ledger.
///
/// A denial is a business outcome, not an error: the counters describe the
/// state that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeOutcome {
    pub success: bool,
    pub swipes_used: i32,
    pub daily_limit: i32,
    pub remaining_swipes: i32,
    pub is_premium: bool,
    pub message: Option<String>,
}

impl SwipeOutcome {
    /// Outcome of a granted swipe, from the post-increment counters.
    pub fn granted(swipes_used: i32, daily_limit: i32, is_premium: bool) -> Self {
        Self {
            success: true,
            swipes_used,
            daily_limit,
            remaining_swipes: remaining_swipes(swipes_used, daily_limit, is_premium),
            is_premium,
            message: None,
        }
    }

    /// Outcome of a denied swipe. Premium users are never denied, so the
    /// snapshot is always a free-tier one.
    pub fn denied(swipes_used: i32, daily_limit: i32) -> Self {
        Self {
            success: false,
            swipes_used,
            daily_limit,
            remaining_swipes: remaining_swipes(swipes_used, daily_limit, false),
            is_premium: false,
            message: Some("Daily swipe limit reached".to_string()),
        }
    }

    /// The quota snapshot this outcome leaves the user in, for refreshing
    /// the client-side session state.
    pub fn to_status(&self) -> QuotaStatus {
        QuotaStatus::from_counts(self.swipes_used, self.daily_limit, self.is_premium)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // -- quota_day ------------------------------------------------------------

    #[test]
    fn quota_day_is_utc_date() {
        let ts = chrono::Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap();
        assert_eq!(quota_day(ts), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn quota_day_rolls_over_at_utc_midnight() {
        let before = chrono::Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap();
        let after = chrono::Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap();
        assert_ne!(quota_day(before), quota_day(after));
    }

    // -- can_swipe ------------------------------------------------------------

    #[test]
    fn free_user_below_limit_can_swipe() {
        assert!(can_swipe(19, DEFAULT_DAILY_LIMIT, false));
    }

    #[test]
    fn free_user_at_limit_cannot_swipe() {
        assert!(!can_swipe(DEFAULT_DAILY_LIMIT, DEFAULT_DAILY_LIMIT, false));
    }

    #[test]
    fn premium_user_at_limit_can_swipe() {
        assert!(can_swipe(DEFAULT_DAILY_LIMIT, DEFAULT_DAILY_LIMIT, true));
    }

    #[test]
    fn premium_user_far_past_limit_can_swipe() {
        assert!(can_swipe(500, DEFAULT_DAILY_LIMIT, true));
    }

    // -- remaining_swipes -----------------------------------------------------

    #[test]
    fn remaining_counts_down_for_free_user() {
        assert_eq!(remaining_swipes(0, 20, false), 20);
        assert_eq!(remaining_swipes(19, 20, false), 1);
        assert_eq!(remaining_swipes(20, 20, false), 0);
    }

    #[test]
    fn remaining_never_negative() {
        assert_eq!(remaining_swipes(25, 20, false), 0);
    }

    #[test]
    fn remaining_is_sentinel_for_premium() {
        assert_eq!(remaining_swipes(0, 20, true), UNLIMITED_REMAINING);
        assert_eq!(remaining_swipes(999, 20, true), UNLIMITED_REMAINING);
    }

    // -- snapshots ------------------------------------------------------------

    #[test]
    fn fresh_status_has_full_allowance() {
        let status = QuotaStatus::fresh(DEFAULT_DAILY_LIMIT, false);
        assert_eq!(status.swipes_used, 0);
        assert_eq!(status.remaining_swipes, DEFAULT_DAILY_LIMIT);
        assert!(status.can_swipe);
        assert!(!status.is_premium);
    }

    #[test]
    fn granted_outcome_at_limit_leaves_no_remaining() {
        let outcome = SwipeOutcome::granted(20, 20, false);
        assert!(outcome.success);
        assert_eq!(outcome.remaining_swipes, 0);
        assert_eq!(outcome.message, None);
        // The next entry-guard check must now block.
        assert!(!outcome.to_status().can_swipe);
    }

    #[test]
    fn denied_outcome_carries_message_and_blocks() {
        let outcome = SwipeOutcome::denied(20, 20);
        assert!(!outcome.success);
        assert_eq!(outcome.remaining_swipes, 0);
        assert!(outcome.message.is_some());
        assert!(!outcome.to_status().can_swipe);
    }

    #[test]
    fn premium_grant_keeps_unlimited_snapshot() {
        let outcome = SwipeOutcome::granted(35, 20, true);
        assert!(outcome.success);
        assert_eq!(outcome.remaining_swipes, UNLIMITED_REMAINING);
        assert!(outcome.to_status().can_swipe);
    }
}
