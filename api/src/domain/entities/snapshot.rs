//! Snapshot period and historical rating entities
//!
//! A snapshot period is an immutable, named, point-in-time capture of the
//! full ranking. Once written its rows never change, even when the
//! underlying ratings do.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::PlayerId;

/// Unique identifier for a snapshot period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotPeriodId(pub Uuid);

impl SnapshotPeriodId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SnapshotPeriodId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SnapshotPeriodId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SnapshotPeriodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable named capture of the full ranking
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotPeriod {
    pub id: SnapshotPeriodId,
    pub name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// One frozen ranking row inside a snapshot period
#[derive(Debug, Clone, Serialize)]
pub struct HistoricalRating {
    pub period_id: SnapshotPeriodId,
    pub player_id: PlayerId,
    pub score: f64,
    pub rank: i32,
    pub rating_count: i32,
}

/// Data for creating a new snapshot period
#[derive(Debug, Clone)]
pub struct NewSnapshotPeriod {
    pub name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Row data captured at snapshot time
#[derive(Debug, Clone)]
pub struct NewHistoricalRating {
    pub player_id: PlayerId,
    pub score: f64,
    pub rank: i32,
    pub rating_count: i32,
}
