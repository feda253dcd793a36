//! SeaORM table models
//!
//! Database-facing models, kept separate from the pure domain entities in
//! `domain::entities`. Conversions into domain types live next to each
//! model.

pub mod anomaly_skips;
pub mod curated_rankings;
pub mod curated_ratings;
pub mod curated_sessions;
pub mod historical_ratings;
pub mod players;
pub mod raters;
pub mod ratings;
pub mod snapshot_periods;
