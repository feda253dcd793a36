//! Curated session handlers
//!
//! Moderator transitions (create, confirm, end) plus the open vote and
//! poll endpoints. There is no push channel: clients poll the current
//! session view at the interval hinted in the response.

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::{CuratedRankingEntry, SessionView};
use crate::auth::require_moderator;
use crate::domain::entities::{CuratedEntry, CuratedSession, CuratedSessionId, NewCuratedEntry, PlayerId};
use crate::error::AppError;
use crate::AppState;

/// Request body for opening a session
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub player_id: Uuid,
}

/// POST /curated/session
///
/// Open a session for a player, superseding any active one.
pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateSessionRequest>,
) -> Result<Json<CuratedSession>, AppError> {
    require_moderator(&headers, &state.config)?;
    let session = state
        .curated_service
        .create_session(&PlayerId(request.player_id))
        .await?;
    Ok(Json(session))
}

/// Response body for the poll endpoint
#[derive(Debug, Serialize)]
pub struct CurrentSessionResponse {
    pub session: Option<SessionView>,
    /// How often clients should re-fetch this view, in seconds.
    pub poll_interval_secs: u64,
}

/// GET /curated/session
///
/// The active session with entries and running mean, or nothing. Safe to
/// re-fetch; everything is recomputed per request.
pub async fn get_current_session(
    State(state): State<AppState>,
) -> Result<Json<CurrentSessionResponse>, AppError> {
    let session = state.curated_service.current_session().await?;
    Ok(Json(CurrentSessionResponse {
        session,
        poll_interval_secs: state.config.curated_poll_secs,
    }))
}

/// Request body for one expert vote
#[derive(Debug, Deserialize)]
pub struct SubmitVoteRequest {
    pub session_id: Uuid,
    pub rater_name: String,
    pub score: Option<i32>,
    pub note: Option<String>,
    #[serde(default)]
    pub confirmed: bool,
}

/// POST /curated/session/votes
///
/// Upsert one named slot. The session id guards against votes landing in a
/// session that was superseded between polls.
pub async fn submit_vote(
    State(state): State<AppState>,
    Json(request): Json<SubmitVoteRequest>,
) -> Result<Json<CuratedEntry>, AppError> {
    let entry = state
        .curated_service
        .submit_vote(
            &CuratedSessionId(request.session_id),
            NewCuratedEntry {
                rater_name: request.rater_name,
                score: request.score,
                note: request.note,
                confirmed: request.confirmed,
            },
        )
        .await?;
    Ok(Json(entry))
}

/// Response body for a confirmed session
#[derive(Debug, Serialize)]
pub struct ConfirmSessionResponse {
    pub player_id: PlayerId,
    pub score: i32,
}

/// POST /curated/session/confirm
///
/// Accept the consensus into the permanent curated ranking.
pub async fn confirm_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ConfirmSessionResponse>, AppError> {
    require_moderator(&headers, &state.config)?;
    let ranking = state.curated_service.confirm_session().await?;
    Ok(Json(ConfirmSessionResponse {
        player_id: ranking.player_id,
        score: ranking.score,
    }))
}

/// Response body for ending a session
#[derive(Debug, Serialize)]
pub struct EndSessionResponse {
    /// False when there was no active session to end (already gone).
    pub ended: bool,
}

/// DELETE /curated/session
///
/// Discard the active session without a permanent write.
pub async fn end_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<EndSessionResponse>, AppError> {
    require_moderator(&headers, &state.config)?;
    let ended = state.curated_service.end_session().await?;
    Ok(Json(EndSessionResponse { ended }))
}

/// GET /curated/rankings
pub async fn list_curated_rankings(
    State(state): State<AppState>,
) -> Result<Json<Vec<CuratedRankingEntry>>, AppError> {
    Ok(Json(state.curated_service.curated_rankings().await?))
}
