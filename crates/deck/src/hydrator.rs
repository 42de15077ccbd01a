//! Deck hydration: candidate ids in, displayable cards out.
//!
//! Ids are fetched in fixed-size batches, concurrently within a batch
//! and paced with a short delay between batches so a cold deck does not
//! burst the provider. Each fetch gets one deadline-bounded attempt and,
//! on timeout only, one retry with no deadline; an id whose fetches fail
//! is dropped from the deck rather than surfaced as an error. Relative
//! order of the surviving ids is preserved.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use dorama_catalog::{CatalogClient, CatalogError, DramaDetail};
use dorama_core::types::DramaId;

use crate::cache::DetailCache;
use crate::config::DeckConfig;
use crate::item::DeckItem;

/// Source of per-title detail records. Implemented by the real catalog
/// client; tests drive the hydrator with scripted sources.
#[async_trait]
pub trait DetailSource: Send + Sync {
    async fn drama_detail(&self, drama_id: DramaId) -> Result<DramaDetail, CatalogError>;
}

#[async_trait]
impl DetailSource for CatalogClient {
    async fn drama_detail(&self, drama_id: DramaId) -> Result<DramaDetail, CatalogError> {
        CatalogClient::drama_detail(self, drama_id).await
    }
}

/// Turns candidate id lists into hydrated [`DeckItem`]s.
pub struct DeckHydrator {
    source: Arc<dyn DetailSource>,
    cache: Arc<DetailCache>,
    config: DeckConfig,
}

impl DeckHydrator {
    pub fn new(source: Arc<dyn DetailSource>, config: DeckConfig) -> Self {
        Self::with_cache(source, Arc::new(DetailCache::new()), config)
    }

    /// Build a hydrator over an existing cache, so successive decks in
    /// one app session share fetched details.
    pub fn with_cache(
        source: Arc<dyn DetailSource>,
        cache: Arc<DetailCache>,
        config: DeckConfig,
    ) -> Self {
        Self {
            source,
            cache,
            config,
        }
    }

    pub fn cache(&self) -> &Arc<DetailCache> {
        &self.cache
    }

    /// Hydrate `ids` into deck cards.
    ///
    /// Positions are assigned contiguously from zero over the ids that
    /// survive; a dropped id shifts everything after it up rather than
    /// leaving a hole. An empty result is a normal outcome, not an
    /// error.
    pub async fn hydrate(&self, ids: &[DramaId]) -> Vec<DeckItem> {
        let batch_size = self.config.batch_size.max(1);
        let mut details: Vec<DramaDetail> = Vec::with_capacity(ids.len());

        for (index, batch) in ids.chunks(batch_size).enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.inter_batch_delay).await;
            }
            // join_all keeps result order aligned with the batch order.
            let fetched = join_all(batch.iter().map(|id| self.fetch_one(*id))).await;
            details.extend(fetched.into_iter().flatten());
        }

        details
            .iter()
            .enumerate()
            .map(|(position, detail)| DeckItem::from_detail(detail, position))
            .collect()
    }

    /// One id: cache consult, bounded fetch, single unbounded retry on
    /// timeout. Returns `None` when the id cannot be hydrated.
    async fn fetch_one(&self, drama_id: DramaId) -> Option<DramaDetail> {
        if let Some(hit) = self.cache.get(drama_id).await {
            return Some(hit);
        }

        let bounded = tokio::time::timeout(
            self.config.per_item_timeout,
            self.source.drama_detail(drama_id),
        )
        .await;

        let result = match bounded {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(drama_id, "Detail fetch hit deadline, retrying unbounded");
                self.source.drama_detail(drama_id).await
            }
        };

        match result {
            Ok(detail) => {
                self.cache.insert(detail.clone()).await;
                Some(detail)
            }
            Err(error) => {
                tracing::warn!(drama_id, error = %error, "Dropping card, detail fetch failed");
                None
            }
        }
    }
}
