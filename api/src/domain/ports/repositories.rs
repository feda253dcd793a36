//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::entities::{
    Category, CuratedEntry, CuratedRanking, CuratedSession, CuratedSessionId, HistoricalRating,
    NewCuratedEntry, NewHistoricalRating, NewRating, NewSnapshotPeriod, Player, PlayerId, Rater,
    RaterId, Rating, RatingId, SnapshotPeriod, SnapshotPeriodId,
};
use crate::error::DomainError;

/// Repository for Player entities.
/// Players are created and edited by external flows; the engine reads them.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Find a player by ID
    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>, DomainError>;

    /// Find all players of one category
    async fn find_by_category(&self, category: Category) -> Result<Vec<Player>, DomainError>;

    /// Find every player
    async fn find_all(&self) -> Result<Vec<Player>, DomainError>;
}

/// Repository for Rater entities
#[async_trait]
pub trait RaterRepository: Send + Sync {
    /// Find a rater by ID
    async fn find_by_id(&self, id: &RaterId) -> Result<Option<Rater>, DomainError>;

    /// Find every rater
    async fn find_all(&self) -> Result<Vec<Rater>, DomainError>;
}

/// Repository for Rating entities
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Find a rating by ID
    async fn find_by_id(&self, id: &RatingId) -> Result<Option<Rating>, DomainError>;

    /// Find all ratings on one player
    async fn find_by_player(&self, player_id: &PlayerId) -> Result<Vec<Rating>, DomainError>;

    /// Find all ratings by one rater
    async fn find_by_rater(&self, rater_id: &RaterId) -> Result<Vec<Rating>, DomainError>;

    /// Find every rating
    async fn find_all(&self) -> Result<Vec<Rating>, DomainError>;

    /// Upsert a validated batch atomically: every (rater, player) row is
    /// inserted or overwritten in one transaction, together with bumping
    /// the rater's `last_rated_at`. No partial commit.
    async fn commit_batch(
        &self,
        rater_id: &RaterId,
        entries: &[NewRating],
    ) -> Result<Vec<Rating>, DomainError>;
}

/// Repository for snapshot periods and their frozen rows
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Find a period by its unique name
    async fn find_period_by_name(&self, name: &str)
        -> Result<Option<SnapshotPeriod>, DomainError>;

    /// List all periods, oldest first
    async fn list_periods(&self) -> Result<Vec<SnapshotPeriod>, DomainError>;

    /// Persist a period and its rows in one transaction.
    /// Rows are immutable once written.
    async fn create(
        &self,
        period: &NewSnapshotPeriod,
        rows: &[NewHistoricalRating],
    ) -> Result<SnapshotPeriod, DomainError>;

    /// Frozen rows of one period, in stored rank order
    async fn find_rows_by_period(
        &self,
        period_id: &SnapshotPeriodId,
    ) -> Result<Vec<HistoricalRating>, DomainError>;

    /// Every frozen row across all periods (for the all-time merge)
    async fn find_all_rows(&self) -> Result<Vec<HistoricalRating>, DomainError>;
}

/// Repository for curated sessions and their entries.
///
/// The single-active invariant lives here: `create_active` must deactivate
/// any currently active session in the same transaction as the insert, and
/// `confirm`/`deactivate` are conditional on the row still being active so
/// racing transitions serialize at the store.
#[async_trait]
pub trait CuratedSessionRepository: Send + Sync {
    /// The currently active session, if any
    async fn find_active(&self) -> Result<Option<CuratedSession>, DomainError>;

    /// Find a session by ID
    async fn find_by_id(&self, id: &CuratedSessionId)
        -> Result<Option<CuratedSession>, DomainError>;

    /// Deactivate any active session and insert a new active one, atomically
    async fn create_active(&self, player_id: &PlayerId) -> Result<CuratedSession, DomainError>;

    /// All entries of one session
    async fn find_entries(
        &self,
        session_id: &CuratedSessionId,
    ) -> Result<Vec<CuratedEntry>, DomainError>;

    /// Insert or overwrite the entry keyed by (session, rater_name)
    async fn upsert_entry(
        &self,
        session_id: &CuratedSessionId,
        entry: &NewCuratedEntry,
    ) -> Result<CuratedEntry, DomainError>;

    /// Mark the session confirmed and inactive, only if it is still active.
    /// Returns false when the session was already ended or superseded.
    async fn confirm(&self, id: &CuratedSessionId) -> Result<bool, DomainError>;

    /// Mark the session inactive without confirming, only if still active.
    /// Returns false when the session was already ended or superseded.
    async fn deactivate(&self, id: &CuratedSessionId) -> Result<bool, DomainError>;
}

/// Repository for the permanent curated ranking table
#[async_trait]
pub trait CuratedRankingRepository: Send + Sync {
    /// Insert or overwrite the curated score for a player
    async fn upsert(&self, player_id: &PlayerId, score: i32)
        -> Result<CuratedRanking, DomainError>;

    /// All curated rankings, highest score first
    async fn list(&self) -> Result<Vec<CuratedRanking>, DomainError>;
}

/// Repository for the anomaly skip list
#[async_trait]
pub trait AnomalySkipRepository: Send + Sync {
    /// Mark a rating as reviewed-not-a-problem. Idempotent.
    async fn add(&self, rating_id: &RatingId) -> Result<(), DomainError>;

    /// Remove a rating from the skip list. Removing an absent entry is
    /// success, not an error.
    async fn remove(&self, rating_id: &RatingId) -> Result<(), DomainError>;

    /// The full skip set
    async fn all(&self) -> Result<HashSet<RatingId>, DomainError>;
}
