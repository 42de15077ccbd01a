//! Route definitions for the `/watchlist` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::watchlist;
use crate::state::AppState;

/// Routes mounted at `/watchlist`.
///
/// ```text
/// POST / -> add_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(watchlist::add_entry))
}
