//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;

pub use postgres::{
    PostgresAnomalySkipRepository, PostgresCuratedRankingRepository,
    PostgresCuratedSessionRepository, PostgresPlayerRepository, PostgresRaterRepository,
    PostgresRatingRepository, PostgresSnapshotRepository,
};
