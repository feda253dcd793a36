//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod anomaly;
pub mod curated;
pub mod player;
pub mod rater;
pub mod rating;
pub mod snapshot;

pub use anomaly::{AnomalyFlag, AnomalyKind};
pub use curated::{
    running_mean, CuratedEntry, CuratedRanking, CuratedSession, CuratedSessionId, NewCuratedEntry,
};
pub use player::{Category, Division, Player, PlayerId};
pub use rater::{Rater, RaterId};
pub use rating::{score_in_scale, NewRating, Rating, RatingId, MAX_SCORE, MIN_SCORE};
pub use snapshot::{
    HistoricalRating, NewHistoricalRating, NewSnapshotPeriod, SnapshotPeriod, SnapshotPeriodId,
};
