//! Rater domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::Division;

/// Unique identifier for a rater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RaterId(pub Uuid);

impl RaterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RaterId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RaterId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RaterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An identity that submits scores.
///
/// System raters are synthetic: they exist only to seed brand-new players
/// with a plausible starting score. They are excluded from the community
/// aggregate as soon as a single real rating exists.
#[derive(Debug, Clone, Serialize)]
pub struct Rater {
    pub id: RaterId,
    pub display_name: String,
    pub division: Option<Division>,
    pub is_system: bool,
    /// Bumped in the same transaction as every committed rating batch.
    pub last_rated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
