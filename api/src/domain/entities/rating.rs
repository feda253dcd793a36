//! Rating domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::PlayerId;
use super::rater::RaterId;

/// Lowest score on the card scale.
pub const MIN_SCORE: i32 = 50;
/// Highest score on the card scale.
pub const MAX_SCORE: i32 = 99;

/// Unique identifier for a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingId(pub Uuid);

impl RatingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RatingId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RatingId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RatingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One rater's opinion of one player.
///
/// (rater_id, player_id) is unique: re-rating overwrites the row in place,
/// it never accumulates history.
#[derive(Debug, Clone, Serialize)]
pub struct Rating {
    pub id: RatingId,
    pub rater_id: RaterId,
    pub player_id: PlayerId,
    pub score: i32,
    pub note: Option<String>,
    pub rated_at: DateTime<Utc>,
}

/// Data for upserting one rating
#[derive(Debug, Clone)]
pub struct NewRating {
    pub player_id: PlayerId,
    pub score: i32,
    pub note: Option<String>,
}

/// Check a score against the card scale.
pub fn score_in_scale(score: i32) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}
