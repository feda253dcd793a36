//! Player domain entity
//!
//! Represents a rated community member. Players are registered and edited
//! by external flows; the rating engine only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PlayerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player category. Each category has its own leaderboard and its own
/// eligibility minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Outfield,
    Goalkeeper,
    Manager,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Outfield, Category::Goalkeeper, Category::Manager];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Outfield => write!(f, "outfield"),
            Category::Goalkeeper => write!(f, "goalkeeper"),
            Category::Manager => write!(f, "manager"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outfield" => Ok(Category::Outfield),
            "goalkeeper" => Ok(Category::Goalkeeper),
            "manager" => Ok(Category::Manager),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Coarse skill band. Raters carry one too; it drives their vote weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Division {
    Elite,
    First,
    Second,
    Third,
}

impl std::fmt::Display for Division {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Division::Elite => write!(f, "elite"),
            Division::First => write!(f, "first"),
            Division::Second => write!(f, "second"),
            Division::Third => write!(f, "third"),
        }
    }
}

impl std::str::FromStr for Division {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "elite" => Ok(Division::Elite),
            "first" => Ok(Division::First),
            "second" => Ok(Division::Second),
            "third" => Ok(Division::Third),
            _ => Err(format!("Unknown division: {}", s)),
        }
    }
}

/// A rated community member
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub gamertag: String,
    pub category: Category,
    /// Legends bypass historical freezing: their all-time entry is always
    /// the live aggregate, never a mean of snapshot rows.
    pub is_legend: bool,
    pub division: Option<Division>,
    pub clan_tag: Option<String>,
    pub created_at: DateTime<Utc>,
}
