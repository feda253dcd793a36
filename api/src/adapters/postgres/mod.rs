//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod anomaly_skip_repo;
pub mod curated_repo;
pub mod player_repo;
pub mod rater_repo;
pub mod rating_repo;
pub mod snapshot_repo;

pub use anomaly_skip_repo::PostgresAnomalySkipRepository;
pub use curated_repo::{PostgresCuratedRankingRepository, PostgresCuratedSessionRepository};
pub use player_repo::PostgresPlayerRepository;
pub use rater_repo::PostgresRaterRepository;
pub use rating_repo::PostgresRatingRepository;
pub use snapshot_repo::PostgresSnapshotRepository;
