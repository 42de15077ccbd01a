//! In-memory detail cache shared across hydration runs.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use dorama_catalog::DramaDetail;
use dorama_core::types::DramaId;

/// Details stay fresh for hours; catalog metadata churns on that scale,
/// not per-session.
const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// TTL cache of provider detail records, keyed by drama id.
///
/// A deck extension or a re-entered discovery screen reuses cached
/// records instead of refetching cards the user has already seen this
/// session. Stale entries are dropped on read.
pub struct DetailCache {
    ttl: Duration,
    entries: Mutex<HashMap<DramaId, CacheEntry>>,
}

struct CacheEntry {
    detail: DramaDetail,
    fetched_at: Instant,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh cached record for `drama_id`, if any. Expired entries are
    /// evicted here rather than by a sweeper.
    pub async fn get(&self, drama_id: DramaId) -> Option<DramaDetail> {
        let mut entries = self.entries.lock().await;
        match entries.get(&drama_id) {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => Some(entry.detail.clone()),
            Some(_) => {
                entries.remove(&drama_id);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, detail: DramaDetail) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            detail.id,
            CacheEntry {
                detail,
                fetched_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl Default for DetailCache {
    fn default() -> Self {
        Self::new()
    }
}
