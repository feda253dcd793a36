//! Curated session entities
//!
//! A curated session is a live consensus round: a moderator opens one for a
//! single player, a bounded set of named experts converge on a score, and
//! the moderator either confirms (writing the permanent curated ranking) or
//! discards it. At most one session is active system-wide.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::PlayerId;

/// Unique identifier for a curated session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CuratedSessionId(pub Uuid);

impl CuratedSessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CuratedSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CuratedSessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CuratedSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live consensus round for one player
#[derive(Debug, Clone, Serialize)]
pub struct CuratedSession {
    pub id: CuratedSessionId,
    pub player_id: PlayerId,
    pub is_active: bool,
    /// Set on the confirm transition; an ended-unconfirmed session keeps it
    /// false forever.
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// One named expert slot inside a session.
///
/// The name is self-declared, not authenticated: whoever submits under a
/// name owns that slot. Last write wins between concurrent tabs.
#[derive(Debug, Clone, Serialize)]
pub struct CuratedEntry {
    pub session_id: CuratedSessionId,
    pub rater_name: String,
    /// None until the expert has actually voted.
    pub score: Option<i32>,
    pub note: Option<String>,
    /// A confirmed entry is read-only until the same name flips it back.
    pub confirmed: bool,
    pub updated_at: DateTime<Utc>,
}

/// Data for upserting one session entry
#[derive(Debug, Clone)]
pub struct NewCuratedEntry {
    pub rater_name: String,
    pub score: Option<i32>,
    pub note: Option<String>,
    pub confirmed: bool,
}

/// Permanent curated score for one player, overwritten on each confirm
#[derive(Debug, Clone, Serialize)]
pub struct CuratedRanking {
    pub player_id: PlayerId,
    pub score: i32,
    pub confirmed_at: DateTime<Utc>,
}

/// Running mean of the non-null scores in a set of entries.
///
/// Recomputed on every fetch for live display; never used for gating.
pub fn running_mean(entries: &[CuratedEntry]) -> Option<f64> {
    let scores: Vec<i32> = entries.iter().filter_map(|e| e.score).collect();
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().map(|s| *s as f64).sum::<f64>() / scores.len() as f64)
}
