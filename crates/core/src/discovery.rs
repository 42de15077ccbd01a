//! Candidate pool construction rules for the swipe deck (PRD-31).
//!
//! This module lives in `core` (zero internal deps) so it can be used by the
//! API server's sourcer and by any future backfill or CLI tooling. The
//! functions are pure set operations over catalog ids; the sourcer composes
//! them with the catalog client and the exclusion resolver.

use std::collections::HashSet;

use chrono::Duration;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{DramaId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of popular-discover pages fetched per sourcing run.
pub const DISCOVER_PAGE_COUNT: u32 = 5;

/// Days a skipped drama stays suppressed before becoming eligible again.
pub const SKIP_SUPPRESSION_DAYS: i64 = 7;

/// Default deck size when the client does not request one.
pub const DEFAULT_DECK_LIMIT: i64 = 10;

/// Maximum deck size a single request may ask for.
pub const MAX_DECK_LIMIT: i64 = 50;

/// Hand-curated fallback pool served when the live source yields nothing.
///
/// Well-known titles by their catalog ids; broad enough that a user is
/// unlikely to have every one of them in a list or inside a skip window.
pub const FALLBACK_DRAMA_IDS: &[DramaId] = &[
    93405,  // Squid Game
    94796,  // Crash Landing on You
    67915,  // Guardian: The Lonely and Great God
    96102,  // Itaewon Class
    90447,  // Hotel del Luna
    117376, // Vincenzo
    197067, // Extraordinary Attorney Woo
    65270,  // Signal
    75820,  // Mr. Sunshine
    110534, // It's Okay to Not Be Okay
];

// ---------------------------------------------------------------------------
// Skip window
// ---------------------------------------------------------------------------

/// Expiry timestamp for a skip recorded at `skipped_at`.
pub fn skip_expiry(skipped_at: Timestamp) -> Timestamp {
    skipped_at + Duration::days(SKIP_SUPPRESSION_DAYS)
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Clamp a requested deck size into `1..=MAX_DECK_LIMIT`, defaulting when
/// absent or non-positive.
pub fn clamp_deck_limit(requested: Option<i64>) -> i64 {
    match requested {
        Some(n) if n > 0 => n.min(MAX_DECK_LIMIT),
        _ => DEFAULT_DECK_LIMIT,
    }
}

// ---------------------------------------------------------------------------
// Pool set operations
// ---------------------------------------------------------------------------

/// Drop duplicate ids, keeping the first occurrence of each.
pub fn dedupe_ids(ids: Vec<DramaId>) -> Vec<DramaId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Remove every id present in the exclusion set, preserving order.
pub fn remove_excluded(ids: Vec<DramaId>, excluded: &HashSet<DramaId>) -> Vec<DramaId> {
    ids.into_iter().filter(|id| !excluded.contains(id)).collect()
}

/// Uniformly shuffle the pool and truncate to `limit`.
///
/// Popularity ordering from the upstream source is deliberately discarded
/// here so the deck does not always open with the same head of the list.
pub fn shuffled_take<R: Rng>(mut ids: Vec<DramaId>, limit: usize, rng: &mut R) -> Vec<DramaId> {
    ids.shuffle(rng);
    ids.truncate(limit);
    ids
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // -- skip_expiry ----------------------------------------------------------

    #[test]
    fn skip_expiry_is_seven_days_out() {
        let skipped = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let expiry = skip_expiry(skipped);
        assert_eq!((expiry - skipped).num_days(), SKIP_SUPPRESSION_DAYS);
    }

    // -- clamp_deck_limit -----------------------------------------------------

    #[test]
    fn clamp_defaults_when_absent() {
        assert_eq!(clamp_deck_limit(None), DEFAULT_DECK_LIMIT);
    }

    #[test]
    fn clamp_defaults_when_non_positive() {
        assert_eq!(clamp_deck_limit(Some(0)), DEFAULT_DECK_LIMIT);
        assert_eq!(clamp_deck_limit(Some(-3)), DEFAULT_DECK_LIMIT);
    }

    #[test]
    fn clamp_caps_at_max() {
        assert_eq!(clamp_deck_limit(Some(500)), MAX_DECK_LIMIT);
    }

    #[test]
    fn clamp_passes_through_in_range() {
        assert_eq!(clamp_deck_limit(Some(25)), 25);
    }

    // -- dedupe_ids -----------------------------------------------------------

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        assert_eq!(dedupe_ids(vec![3, 1, 3, 2, 1, 4]), vec![3, 1, 2, 4]);
    }

    #[test]
    fn dedupe_of_empty_is_empty() {
        assert!(dedupe_ids(Vec::new()).is_empty());
    }

    // -- remove_excluded ------------------------------------------------------

    #[test]
    fn excluded_ids_are_removed_in_order() {
        let excluded: HashSet<DramaId> = [2, 4].into_iter().collect();
        assert_eq!(remove_excluded(vec![1, 2, 3, 4, 5], &excluded), vec![1, 3, 5]);
    }

    #[test]
    fn empty_exclusion_set_removes_nothing() {
        let excluded = HashSet::new();
        assert_eq!(remove_excluded(vec![1, 2, 3], &excluded), vec![1, 2, 3]);
    }

    // -- shuffled_take --------------------------------------------------------

    #[test]
    fn shuffled_take_truncates_to_limit() {
        let mut rng = rand::rng();
        let out = shuffled_take((1..=100).collect(), 10, &mut rng);
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn shuffled_take_is_a_permutation_when_under_limit() {
        let mut rng = rand::rng();
        let out = shuffled_take(vec![1, 3, 5], 10, &mut rng);
        let expected: HashSet<DramaId> = [1, 3, 5].into_iter().collect();
        let got: HashSet<DramaId> = out.iter().copied().collect();
        assert_eq!(out.len(), 3);
        assert_eq!(got, expected);
    }

    #[test]
    fn fallback_pool_has_no_duplicates() {
        let unique: HashSet<DramaId> = FALLBACK_DRAMA_IDS.iter().copied().collect();
        assert_eq!(unique.len(), FALLBACK_DRAMA_IDS.len());
    }
}
