//! Request handlers for the discovery feed endpoints.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the discovery services and repositories and map
//! errors via [`AppError`](crate::error::AppError); the quota and candidate
//! handlers are deliberately infallible (see the fail-open policy in
//! [`crate::discovery::quota`]).

pub mod discover;
pub mod watchlist;
