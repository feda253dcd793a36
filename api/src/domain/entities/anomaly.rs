//! Anomaly flag types
//!
//! Flags are derived data: the detector recomputes them on every scan and
//! the skip list suppresses the ones a human has already dismissed.

use serde::Serialize;

use super::player::PlayerId;
use super::rater::RaterId;
use super::rating::RatingId;

/// Which detector produced a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Fewer than three real ratings averaging suspiciously high; every
    /// contributing rating is flagged individually.
    SuspiciousBoost,
    /// One rating far from the player's simple average.
    Deviation,
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnomalyKind::SuspiciousBoost => write!(f, "suspicious_boost"),
            AnomalyKind::Deviation => write!(f, "deviation"),
        }
    }
}

/// One suspicious rating surfaced for human triage
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyFlag {
    pub rating_id: RatingId,
    pub kind: AnomalyKind,
    pub player_id: PlayerId,
    pub rater_id: RaterId,
    pub score: i32,
    /// Simple unweighted average of the player's real ratings.
    pub average: f64,
    /// |score - average|.
    pub deviation: f64,
    /// The other real scores on the same player, sorted ascending.
    pub peers: Vec<i32>,
}
