//! Handler for the thin watchlist-add interface.
//!
//! The list feature proper lives outside this engine; discovery only needs
//! the append used by an accept swipe, carrying whatever metadata the client
//! had hydrated at swipe time. Accepting a drama that is already listed
//! updates the existing row rather than erroring.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use dorama_core::watchlist::{validate_status, STATUS_PLAN_TO_WATCH};
use dorama_db::models::watchlist::{CreateWatchlistEntry, WatchlistEntry};
use dorama_db::repositories::WatchlistRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/watchlist
///
/// Add (or re-file) a drama on the authenticated user's list. The status
/// defaults to `plan_to_watch`, the status an accept swipe records.
pub async fn add_entry(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWatchlistEntry>,
) -> AppResult<(StatusCode, Json<DataResponse<WatchlistEntry>>)> {
    if input.drama_id <= 0 {
        return Err(AppError::BadRequest("drama_id must be positive".into()));
    }

    let status = input.status.as_deref().unwrap_or(STATUS_PLAN_TO_WATCH);
    validate_status(status)?;

    let entry = WatchlistRepo::upsert(&state.pool, user.user_id, status, &input).await?;

    tracing::debug!(
        user_id = user.user_id,
        drama_id = entry.drama_id,
        status = %entry.status,
        "Watchlist entry recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}
