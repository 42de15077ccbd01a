//! Typed response records for the catalog provider API.
//!
//! Only the fields this engine consumes are modeled; unknown fields in
//! provider payloads are ignored. `id` and `name` are required -- a
//! payload without them fails deserialization so the caller drops the
//! item instead of surfacing a half-formed record.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use dorama_core::types::DramaId;

/// Full detail record for a single title, returned by `GET /tv/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DramaDetail {
    /// Provider identifier for the title.
    pub id: DramaId,
    /// Display title.
    pub name: String,
    /// Poster image path, relative to the provider's image host.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// First air date. The provider sends an empty string for unknown
    /// dates; those (and unparseable values) become `None`.
    #[serde(default, deserialize_with = "lenient_date")]
    pub first_air_date: Option<NaiveDate>,
    /// Average user rating on the provider's 0-10 scale.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Episode count across all seasons, when the provider knows it.
    #[serde(default)]
    pub number_of_episodes: Option<i32>,
    /// Synopsis text.
    #[serde(default)]
    pub overview: Option<String>,
}

/// One page of the paged `GET /discover/tv` popularity query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscoverPage {
    /// 1-based page number echoed back by the provider.
    pub page: u32,
    /// Titles on this page, in provider popularity order.
    pub results: Vec<DiscoverEntry>,
}

/// A single title in a discover page. Only the identifier is consumed;
/// detail hydration happens separately per id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscoverEntry {
    pub id: DramaId,
}

impl DiscoverPage {
    /// Drama ids on this page, in page order.
    pub fn ids(&self) -> Vec<DramaId> {
        self.results.iter().map(|entry| entry.id).collect()
    }
}

/// Deserialize an optional `YYYY-MM-DD` date, treating the provider's
/// empty-string-for-unknown convention and malformed values as `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()))
}
