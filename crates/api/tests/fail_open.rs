//! Fail-open behaviour when the store is unreachable.
//!
//! These tests use a lazily-connected pool aimed at an unroutable address,
//! so every query fails at acquire time. The ledger must degrade to
//! permissive results rather than erroring, and the candidate sourcer must
//! still serve the fallback pool. No database server is required.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use dorama_api::discovery::{CandidateSourcer, QuotaLedger};
use dorama_catalog::CatalogClient;
use dorama_core::discovery::FALLBACK_DRAMA_IDS;
use dorama_core::quota::DEFAULT_DAILY_LIMIT;

/// A pool whose every acquire fails fast: nothing listens on port 1.
fn dead_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy("postgres://postgres@127.0.0.1:1/unreachable")
        .expect("lazy connect never touches the network")
}

/// A catalog client whose every request fails fast: port 9 is unroutable.
fn dead_catalog() -> CatalogClient {
    CatalogClient::new("http://127.0.0.1:9".to_string(), "test-key".to_string())
}

#[tokio::test]
async fn status_degrades_to_permissive_when_store_is_down() {
    let status = QuotaLedger::status(&dead_pool(), 1).await;

    assert!(status.can_swipe, "fail-open: reads must not block the user");
    assert_eq!(status.swipes_used, 0);
    assert_eq!(status.daily_limit, DEFAULT_DAILY_LIMIT);
    assert_eq!(status.remaining_swipes, DEFAULT_DAILY_LIMIT);
    assert!(!status.is_premium);
}

#[tokio::test]
async fn consume_degrades_to_granted_when_store_is_down() {
    let outcome = QuotaLedger::check_and_consume(&dead_pool(), 1).await;

    assert!(outcome.success, "fail-open: over-granting beats blocking");
    assert_eq!(outcome.daily_limit, DEFAULT_DAILY_LIMIT);
}

#[tokio::test]
async fn sourcing_survives_store_and_catalog_both_down() {
    let ids = CandidateSourcer::candidates(&dead_pool(), &dead_catalog(), 1, 50).await;

    assert!(!ids.is_empty(), "fallback pool must prevent starvation");
    assert!(ids.iter().all(|id| FALLBACK_DRAMA_IDS.contains(id)));
}
