//! Domain logic for the discovery feed engine.
//!
//! Everything here is pure (no I/O, no internal dependencies) so it can be
//! shared by the API server, the repository layer, and the client-side deck
//! crate alike.

pub mod discovery;
pub mod error;
pub mod quota;
pub mod roles;
pub mod types;
pub mod watchlist;
