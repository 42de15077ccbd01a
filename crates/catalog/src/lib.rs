//! HTTP client for the external drama catalog provider.
//!
//! Wraps the catalog's keyed REST API (title details, paged popularity
//! discovery) using [`reqwest`], with typed response records that are
//! validated at the boundary: a payload missing a required field fails
//! deserialization and the item is dropped by the caller rather than
//! propagated half-formed.

pub mod client;
pub mod types;

pub use client::{CatalogClient, CatalogError};
pub use types::{DiscoverEntry, DiscoverPage, DramaDetail};
