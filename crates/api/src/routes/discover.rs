//! Route definitions for the `/discover` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::discover;
use crate::state::AppState;

/// Routes mounted at `/discover`.
///
/// ```text
/// GET  /quota           -> quota_status
/// POST /quota/consume   -> consume_quota
/// GET  /dramas          -> get_dramas     (?limit=N)
/// POST /skips           -> skip_drama
/// POST /skips/purge     -> purge_skips    (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quota", get(discover::quota_status))
        .route("/quota/consume", post(discover::consume_quota))
        .route("/dramas", get(discover::get_dramas))
        .route("/skips", post(discover::skip_drama))
        .route("/skips/purge", post(discover::purge_skips))
}
