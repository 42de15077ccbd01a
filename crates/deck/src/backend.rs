//! Client-side view of the discovery REST API.
//!
//! The [`SwipeBackend`] trait is the orchestrator's only route to the
//! server, so tests can swap in a scripted backend. [`BackendClient`]
//! is the real implementation: bearer-authenticated [`reqwest`] calls
//! against the `/api/v1` surface, unwrapping each response from its
//! `{ "data": ... }` envelope.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use dorama_core::quota::{QuotaStatus, SwipeOutcome};
use dorama_core::types::DramaId;

use crate::item::DeckItem;

/// Errors from the discovery API layer.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("discovery API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Payload for adding a title to the user's watchlist, carrying the
/// card metadata so the list row renders without another catalog fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistAdd {
    pub drama_id: DramaId,
    /// Omitted so the server applies its plan-to-watch default.
    pub status: Option<String>,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub rating: Option<f64>,
}

impl WatchlistAdd {
    pub fn from_item(item: &DeckItem) -> Self {
        Self {
            drama_id: item.drama_id,
            status: None,
            title: Some(item.title.clone()),
            poster_path: item.poster_path.clone(),
            rating: item.rating,
        }
    }
}

/// Server calls the swipe orchestrator makes. One method per endpoint
/// it consumes.
#[async_trait]
pub trait SwipeBackend: Send + Sync {
    /// Current quota snapshot, without consuming anything.
    async fn quota_status(&self) -> Result<QuotaStatus, BackendError>;

    /// Atomically consume one swipe. A denial is a successful call with
    /// `success == false`, never an `Err`.
    async fn consume_swipe(&self) -> Result<SwipeOutcome, BackendError>;

    /// Record a left swipe so the title stays out of future decks for
    /// the suppression window.
    async fn record_skip(&self, drama_id: DramaId) -> Result<(), BackendError>;

    /// Record a right swipe into the user's watchlist.
    async fn add_to_watchlist(&self, entry: &WatchlistAdd) -> Result<(), BackendError>;

    /// Fetch up to `limit` fresh candidate ids for the deck.
    async fn fetch_candidates(&self, limit: i64) -> Result<Vec<DramaId>, BackendError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Standard response envelope the API wraps every payload in.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct DramasPayload {
    drama_ids: Vec<DramaId>,
}

#[derive(Debug, Serialize)]
struct SkipBody {
    drama_id: DramaId,
}

/// Bearer-authenticated client for the discovery API.
///
/// Requests carry no deadline of their own; only hydration fetches are
/// time-bounded, and those run through the catalog client instead.
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl BackendClient {
    /// * `base_url` - server origin, e.g. `https://api.example.com`, no
    ///   trailing slash.
    /// * `access_token` - the signed-in user's JWT.
    pub fn new(base_url: String, access_token: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, access_token)
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(client: reqwest::Client, base_url: String, access_token: String) -> Self {
        Self {
            client,
            base_url,
            access_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    async fn unwrap_envelope<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let envelope = response.json::<Envelope<T>>().await?;
        Ok(envelope.data)
    }

    async fn get_data<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn post_data<T: serde::de::DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, BackendError> {
        let mut request = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.access_token);
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::unwrap_envelope(request.send().await?).await
    }
}

#[async_trait]
impl SwipeBackend for BackendClient {
    async fn quota_status(&self) -> Result<QuotaStatus, BackendError> {
        self.get_data("/discover/quota", &[]).await
    }

    async fn consume_swipe(&self) -> Result<SwipeOutcome, BackendError> {
        self.post_data::<SwipeOutcome, ()>("/discover/quota/consume", None)
            .await
    }

    async fn record_skip(&self, drama_id: DramaId) -> Result<(), BackendError> {
        #[derive(Deserialize)]
        struct SkipAck {
            #[allow(dead_code)]
            success: bool,
        }

        let _ack: SkipAck = self
            .post_data("/discover/skips", Some(&SkipBody { drama_id }))
            .await?;
        Ok(())
    }

    async fn add_to_watchlist(&self, entry: &WatchlistAdd) -> Result<(), BackendError> {
        // The created entry comes back in the envelope; the deck has no
        // use for it beyond confirming the write parsed.
        let _entry: serde::de::IgnoredAny = self.post_data("/watchlist", Some(entry)).await?;
        Ok(())
    }

    async fn fetch_candidates(&self, limit: i64) -> Result<Vec<DramaId>, BackendError> {
        let payload: DramasPayload = self
            .get_data("/discover/dramas", &[("limit", limit.to_string())])
            .await?;
        Ok(payload.drama_ids)
    }
}
