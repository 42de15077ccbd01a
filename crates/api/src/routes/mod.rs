pub mod discover;
pub mod health;
pub mod watchlist;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /discover/quota              quota snapshot (GET)
/// /discover/quota/consume      consume one swipe (POST)
/// /discover/dramas             candidate ids (GET, ?limit=N)
/// /discover/skips              record a skip (POST)
/// /discover/skips/purge        purge expired skips (POST, admin only)
///
/// /watchlist                   add a drama to the user's list (POST)
/// ```
///
/// All routes require a bearer token; the health check lives at the root
/// level, outside this tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Discovery feed: quota ledger, candidate sourcing, skip bookkeeping.
        .nest("/discover", discover::router())
        // Thin list-collaborator interface used by accept swipes.
        .nest("/watchlist", watchlist::router())
}
