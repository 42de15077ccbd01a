//! REST client for the catalog provider's keyed HTTP endpoints.
//!
//! Wraps the two queries this engine consumes (title details, paged
//! popularity discovery) using [`reqwest`]. The provider is treated as
//! unreliable: callers are expected to tolerate per-request failures.

use std::time::Duration;

use crate::types::{DiscoverPage, DramaDetail};

/// Default origin-country filter for discovery queries.
pub const DEFAULT_ORIGIN_COUNTRY: &str = "KR";

/// Default minimum vote average for discovery queries.
pub const DEFAULT_MIN_VOTE_AVERAGE: f64 = 7.0;

/// Deadline applied to each discover-page request. Detail requests are
/// not bounded here; the deck hydrator applies its own per-item timeout.
const DISCOVER_TIMEOUT: Duration = Duration::from_secs(8);

/// HTTP client for the catalog provider.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    origin_country: String,
    min_vote_average: f64,
}

/// Errors from the catalog REST layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("catalog API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl CatalogClient {
    /// Create a new client for the provider at `base_url`, authenticating
    /// every request with `api_key`.
    ///
    /// * `base_url` - e.g. `https://api.themoviedb.org/3`, no trailing slash.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling across services).
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            origin_country: DEFAULT_ORIGIN_COUNTRY.to_string(),
            min_vote_average: DEFAULT_MIN_VOTE_AVERAGE,
        }
    }

    /// Override the origin-country filter used by [`discover_page`].
    ///
    /// [`discover_page`]: CatalogClient::discover_page
    pub fn with_origin_country(mut self, origin: impl Into<String>) -> Self {
        self.origin_country = origin.into();
        self
    }

    /// Override the minimum vote average used by [`discover_page`].
    ///
    /// [`discover_page`]: CatalogClient::discover_page
    pub fn with_min_vote_average(mut self, min: f64) -> Self {
        self.min_vote_average = min;
        self
    }

    /// Fetch the full detail record for one title.
    ///
    /// Sends `GET /tv/{id}`. No deadline is applied here; callers bound
    /// the call themselves (the deck hydrator wraps it in a per-item
    /// timeout with a single unbounded retry).
    pub async fn drama_detail(&self, drama_id: i64) -> Result<DramaDetail, CatalogError> {
        let response = self
            .client
            .get(format!("{}/tv/{}", self.base_url, drama_id))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch one page of the popularity discover query, filtered to the
    /// configured origin country and minimum vote average.
    ///
    /// Sends `GET /discover/tv` with `sort_by=popularity.desc`. Each
    /// request carries a fixed deadline; pages are 1-based.
    pub async fn discover_page(&self, page: u32) -> Result<DiscoverPage, CatalogError> {
        let min_vote = self.min_vote_average.to_string();
        let page_param = page.to_string();
        let response = self
            .client
            .get(format!("{}/discover/tv", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("sort_by", "popularity.desc"),
                ("with_origin_country", self.origin_country.as_str()),
                ("vote_average.gte", min_vote.as_str()),
                ("page", page_param.as_str()),
            ])
            .timeout(DISCOVER_TIMEOUT)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`CatalogError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
