//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and configuration;
//! the pure numeric logic lives in `scoring` and `eligibility`.

pub mod anomaly_service;
pub mod curated_service;
pub mod eligibility;
pub mod ranking_service;
pub mod rating_config;
pub mod rating_service;
pub mod scoring;
pub mod snapshot_service;

pub use anomaly_service::{AnomalyReport, AnomalyService};
pub use curated_service::{CuratedRankingEntry, CuratedSessionService, SessionView};
pub use ranking_service::{RankedPlayer, RankingService};
pub use rating_config::{EligibilityMinimums, RatingConfig};
pub use rating_service::RatingService;
pub use snapshot_service::{AllTimeEntry, PeriodScore, SnapshotService, LIVE_PERIOD_LABEL};
// Re-export the scoring primitives for consumers of the aggregate types
#[allow(unused_imports)]
pub use eligibility::{category_counts, eligible_rater_ids, CategoryCounts};
#[allow(unused_imports)]
pub use scoring::{
    aggregate_score, deviation_band, guard_average, rank_order, ranking_votes, snapshot_votes,
    weighted_mean, AggregateScore, ScoreSource, SplitVotes, WeightedVote,
};
