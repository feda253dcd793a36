//! Rating submission handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{NewRating, PlayerId, RaterId};
use crate::error::AppError;
use crate::AppState;

/// One entry of a rating batch
#[derive(Debug, Deserialize)]
pub struct RatingEntry {
    pub player_id: Uuid,
    pub score: i32,
    pub note: Option<String>,
}

/// Request body for submitting a batch of ratings
#[derive(Debug, Deserialize)]
pub struct SubmitRatingsRequest {
    pub rater_id: Uuid,
    pub ratings: Vec<RatingEntry>,
}

/// Response body for a committed batch
#[derive(Debug, Serialize)]
pub struct SubmitRatingsResponse {
    pub submitted: usize,
}

/// POST /ratings
///
/// Validate and commit a rater's whole batch. Any deviation-guard
/// violation rejects the entire batch with one message per failing player.
pub async fn submit_ratings(
    State(state): State<AppState>,
    Json(request): Json<SubmitRatingsRequest>,
) -> Result<Json<SubmitRatingsResponse>, AppError> {
    let rater_id = RaterId(request.rater_id);
    let entries: Vec<NewRating> = request
        .ratings
        .into_iter()
        .map(|e| NewRating {
            player_id: PlayerId(e.player_id),
            score: e.score,
            note: e.note,
        })
        .collect();

    let saved = state.rating_service.submit_ratings(&rater_id, entries).await?;

    Ok(Json(SubmitRatingsResponse {
        submitted: saved.len(),
    }))
}
