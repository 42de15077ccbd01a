//! Handlers for the `/discover` endpoints.
//!
//! Quota reads/consumes and candidate sourcing never return an HTTP error:
//! a denied swipe is a business outcome carried in the payload, and store or
//! catalog failures degrade per the fail-open policy. Only the skip write
//! and the admin purge can fail in the HTTP sense.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use dorama_core::discovery::clamp_deck_limit;
use dorama_core::quota::{QuotaStatus, SwipeOutcome};
use dorama_core::types::DramaId;

use crate::discovery::{CandidateSourcer, ExclusionResolver, QuotaLedger};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the candidates endpoint.
#[derive(Debug, Deserialize)]
pub struct DramasQuery {
    /// Requested deck size; clamped server-side.
    pub limit: Option<i64>,
}

/// Response payload for the candidates endpoint.
#[derive(Debug, Serialize)]
pub struct DramasResponse {
    pub drama_ids: Vec<DramaId>,
}

/// Request body for recording a skip.
#[derive(Debug, Deserialize)]
pub struct SkipRequest {
    pub drama_id: DramaId,
}

/// Response payload for a recorded skip.
#[derive(Debug, Serialize)]
pub struct SkipResponse {
    pub success: bool,
}

/// Response payload for the skip purge.
#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub deleted_count: u64,
}

/// GET /api/v1/discover/quota
///
/// The user's current daily quota snapshot, without consuming anything.
pub async fn quota_status(
    user: AuthUser,
    State(state): State<AppState>,
) -> Json<DataResponse<QuotaStatus>> {
    let status = QuotaLedger::status(&state.pool, user.user_id).await;
    Json(DataResponse { data: status })
}

/// POST /api/v1/discover/quota/consume
///
/// Atomically consume one swipe. A denial is reported as `success: false`
/// with the untouched counters, never as an HTTP error.
pub async fn consume_quota(
    user: AuthUser,
    State(state): State<AppState>,
) -> Json<DataResponse<SwipeOutcome>> {
    let outcome = QuotaLedger::check_and_consume(&state.pool, user.user_id).await;
    Json(DataResponse { data: outcome })
}

/// GET /api/v1/discover/dramas?limit=N
///
/// Shuffled candidate ids for the user's deck, at most `limit` of them.
pub async fn get_dramas(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DramasQuery>,
) -> Json<DataResponse<DramasResponse>> {
    let limit = clamp_deck_limit(params.limit);
    let drama_ids =
        CandidateSourcer::candidates(&state.pool, &state.catalog, user.user_id, limit).await;
    Json(DataResponse {
        data: DramasResponse { drama_ids },
    })
}

/// POST /api/v1/discover/skips
///
/// Record a left swipe, suppressing the drama for the rolling skip window.
/// Idempotent: re-skipping refreshes the window.
pub async fn skip_drama(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SkipRequest>,
) -> AppResult<Json<DataResponse<SkipResponse>>> {
    if input.drama_id <= 0 {
        return Err(AppError::BadRequest("drama_id must be positive".into()));
    }

    ExclusionResolver::record_skip(&state.pool, user.user_id, input.drama_id).await?;
    Ok(Json(DataResponse {
        data: SkipResponse { success: true },
    }))
}

/// POST /api/v1/discover/skips/purge
///
/// Delete all skip entries whose suppression window has lapsed, across all
/// users. Storage hygiene only; admin role required.
pub async fn purge_skips(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PurgeResponse>>> {
    let deleted_count = ExclusionResolver::purge_expired(&state.pool).await?;
    tracing::info!(admin_id = user.user_id, deleted_count, "Skip purge run");
    Ok(Json(DataResponse {
        data: PurgeResponse { deleted_count },
    }))
}
