//! Client-side swipe deck engine.
//!
//! Everything the discovery screen needs between the wire and the UI:
//! a [`DeckHydrator`] that turns candidate ids into displayable cards
//! (batched fetches, per-item deadline with one unbounded retry), a
//! [`SwipeSession`] holding deck and cursor state, and a
//! [`SwipeOrchestrator`] that advances the cursor optimistically and
//! settles each swipe against the quota service in the background.
//!
//! Server calls go through the [`SwipeBackend`] trait so the engine can
//! be driven against a scripted backend in tests; [`BackendClient`] is
//! the production implementation over the discovery REST API.

pub mod backend;
pub mod cache;
pub mod config;
pub mod hydrator;
pub mod item;
pub mod orchestrator;
pub mod session;

pub use backend::{BackendClient, BackendError, SwipeBackend, WatchlistAdd};
pub use cache::DetailCache;
pub use config::DeckConfig;
pub use hydrator::{DeckHydrator, DetailSource};
pub use item::DeckItem;
pub use orchestrator::{SettleOutcome, SwipeDirection, SwipeOrchestrator, SwipeRejection};
pub use session::SwipeSession;
