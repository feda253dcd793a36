//! Mock implementations of port traits
//!
//! In-memory implementations that can be seeded for testing. They store
//! data behind `RwLock`s and mirror the store-level guarantees the
//! Postgres adapters provide (conditional session transitions, atomic-ish
//! batch upserts).

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Category, CuratedEntry, CuratedRanking, CuratedSession, CuratedSessionId, HistoricalRating,
    NewCuratedEntry, NewHistoricalRating, NewRating, NewSnapshotPeriod, Player, PlayerId, Rater,
    RaterId, Rating, RatingId, SnapshotPeriod, SnapshotPeriodId,
};
use crate::domain::ports::{
    AnomalySkipRepository, CuratedRankingRepository, CuratedSessionRepository, PlayerRepository,
    RaterRepository, RatingRepository, SnapshotRepository,
};
use crate::error::DomainError;

// ============================================================================
// In-Memory Player Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPlayerRepository {
    players: Arc<RwLock<HashMap<PlayerId, Player>>>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a player for testing
    pub fn with_player(self, player: Player) -> Self {
        self.insert(player);
        self
    }

    /// Seed a player into an already-shared repository
    pub fn insert(&self, player: Player) {
        self.players.write().unwrap().insert(player.id, player);
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>, DomainError> {
        Ok(self.players.read().unwrap().get(id).cloned())
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Player>, DomainError> {
        Ok(self
            .players
            .read()
            .unwrap()
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Player>, DomainError> {
        Ok(self.players.read().unwrap().values().cloned().collect())
    }
}

// ============================================================================
// In-Memory Rater Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryRaterRepository {
    raters: Arc<RwLock<HashMap<RaterId, Rater>>>,
}

impl InMemoryRaterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a rater for testing
    pub fn with_rater(self, rater: Rater) -> Self {
        self.insert(rater);
        self
    }

    /// Seed a rater into an already-shared repository
    pub fn insert(&self, rater: Rater) {
        self.raters.write().unwrap().insert(rater.id, rater);
    }

    fn touch(&self, id: &RaterId) {
        if let Some(rater) = self.raters.write().unwrap().get_mut(id) {
            rater.last_rated_at = Some(Utc::now());
        }
    }
}

#[async_trait]
impl RaterRepository for InMemoryRaterRepository {
    async fn find_by_id(&self, id: &RaterId) -> Result<Option<Rater>, DomainError> {
        Ok(self.raters.read().unwrap().get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Rater>, DomainError> {
        Ok(self.raters.read().unwrap().values().cloned().collect())
    }
}

// ============================================================================
// In-Memory Rating Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryRatingRepository {
    ratings: Arc<RwLock<HashMap<(RaterId, PlayerId), Rating>>>,
    /// Linked rater store so `commit_batch` can bump `last_rated_at` the
    /// way the Postgres transaction does.
    rater_store: Option<Arc<InMemoryRaterRepository>>,
}

impl InMemoryRatingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rater_store(mut self, raters: Arc<InMemoryRaterRepository>) -> Self {
        self.rater_store = Some(raters);
        self
    }

    /// Seed or overwrite one rating, keeping the row id stable on upsert.
    pub fn put(&self, rater_id: RaterId, player_id: PlayerId, score: i32) {
        let mut ratings = self.ratings.write().unwrap();
        match ratings.get_mut(&(rater_id, player_id)) {
            Some(existing) => {
                existing.score = score;
                existing.rated_at = Utc::now();
            }
            None => {
                ratings.insert(
                    (rater_id, player_id),
                    Rating {
                        id: RatingId::new(),
                        rater_id,
                        player_id,
                        score,
                        note: None,
                        rated_at: Utc::now(),
                    },
                );
            }
        }
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn find_by_id(&self, id: &RatingId) -> Result<Option<Rating>, DomainError> {
        Ok(self
            .ratings
            .read()
            .unwrap()
            .values()
            .find(|r| r.id == *id)
            .cloned())
    }

    async fn find_by_player(&self, player_id: &PlayerId) -> Result<Vec<Rating>, DomainError> {
        Ok(self
            .ratings
            .read()
            .unwrap()
            .values()
            .filter(|r| r.player_id == *player_id)
            .cloned()
            .collect())
    }

    async fn find_by_rater(&self, rater_id: &RaterId) -> Result<Vec<Rating>, DomainError> {
        Ok(self
            .ratings
            .read()
            .unwrap()
            .values()
            .filter(|r| r.rater_id == *rater_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Rating>, DomainError> {
        Ok(self.ratings.read().unwrap().values().cloned().collect())
    }

    async fn commit_batch(
        &self,
        rater_id: &RaterId,
        entries: &[NewRating],
    ) -> Result<Vec<Rating>, DomainError> {
        let mut saved = Vec::with_capacity(entries.len());
        {
            let mut ratings = self.ratings.write().unwrap();
            for entry in entries {
                let key = (*rater_id, entry.player_id);
                let row = match ratings.get_mut(&key) {
                    Some(existing) => {
                        existing.score = entry.score;
                        existing.note = entry.note.clone();
                        existing.rated_at = Utc::now();
                        existing.clone()
                    }
                    None => {
                        let row = Rating {
                            id: RatingId::new(),
                            rater_id: *rater_id,
                            player_id: entry.player_id,
                            score: entry.score,
                            note: entry.note.clone(),
                            rated_at: Utc::now(),
                        };
                        ratings.insert(key, row.clone());
                        row
                    }
                };
                saved.push(row);
            }
        }
        if let Some(raters) = &self.rater_store {
            raters.touch(rater_id);
        }
        Ok(saved)
    }
}

// ============================================================================
// In-Memory Snapshot Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySnapshotRepository {
    periods: Arc<RwLock<Vec<SnapshotPeriod>>>,
    rows: Arc<RwLock<Vec<HistoricalRating>>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotRepository for InMemorySnapshotRepository {
    async fn find_period_by_name(
        &self,
        name: &str,
    ) -> Result<Option<SnapshotPeriod>, DomainError> {
        Ok(self
            .periods
            .read()
            .unwrap()
            .iter()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn list_periods(&self) -> Result<Vec<SnapshotPeriod>, DomainError> {
        Ok(self.periods.read().unwrap().clone())
    }

    async fn create(
        &self,
        period: &NewSnapshotPeriod,
        rows: &[NewHistoricalRating],
    ) -> Result<SnapshotPeriod, DomainError> {
        let mut periods = self.periods.write().unwrap();
        if periods.iter().any(|p| p.name == period.name) {
            return Err(DomainError::AlreadyExists(format!(
                "snapshot period '{}' already exists",
                period.name
            )));
        }
        let created = SnapshotPeriod {
            id: SnapshotPeriodId::new(),
            name: period.name.clone(),
            starts_at: period.starts_at,
            ends_at: period.ends_at,
            created_at: Utc::now(),
        };
        periods.push(created.clone());

        let mut stored = self.rows.write().unwrap();
        for row in rows {
            stored.push(HistoricalRating {
                period_id: created.id,
                player_id: row.player_id,
                score: row.score,
                rank: row.rank,
                rating_count: row.rating_count,
            });
        }
        Ok(created)
    }

    async fn find_rows_by_period(
        &self,
        period_id: &SnapshotPeriodId,
    ) -> Result<Vec<HistoricalRating>, DomainError> {
        let mut rows: Vec<HistoricalRating> = self
            .rows
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.period_id == *period_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.rank);
        Ok(rows)
    }

    async fn find_all_rows(&self) -> Result<Vec<HistoricalRating>, DomainError> {
        Ok(self.rows.read().unwrap().clone())
    }
}

// ============================================================================
// In-Memory Curated Session Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCuratedSessionRepository {
    sessions: Arc<RwLock<HashMap<CuratedSessionId, CuratedSession>>>,
    entries: Arc<RwLock<HashMap<CuratedSessionId, Vec<CuratedEntry>>>>,
}

impl InMemoryCuratedSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CuratedSessionRepository for InMemoryCuratedSessionRepository {
    async fn find_active(&self) -> Result<Option<CuratedSession>, DomainError> {
        Ok(self
            .sessions
            .read()
            .unwrap()
            .values()
            .find(|s| s.is_active)
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: &CuratedSessionId,
    ) -> Result<Option<CuratedSession>, DomainError> {
        Ok(self.sessions.read().unwrap().get(id).cloned())
    }

    async fn create_active(&self, player_id: &PlayerId) -> Result<CuratedSession, DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        // Same effect as the adapter's transaction: no moment with two
        // active rows.
        for session in sessions.values_mut() {
            if session.is_active {
                session.is_active = false;
                session.ended_at = Some(Utc::now());
            }
        }
        let created = CuratedSession {
            id: CuratedSessionId::new(),
            player_id: *player_id,
            is_active: true,
            is_confirmed: false,
            created_at: Utc::now(),
            ended_at: None,
        };
        sessions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_entries(
        &self,
        session_id: &CuratedSessionId,
    ) -> Result<Vec<CuratedEntry>, DomainError> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_entry(
        &self,
        session_id: &CuratedSessionId,
        entry: &NewCuratedEntry,
    ) -> Result<CuratedEntry, DomainError> {
        let mut entries = self.entries.write().unwrap();
        let slots = entries.entry(*session_id).or_default();
        let row = CuratedEntry {
            session_id: *session_id,
            rater_name: entry.rater_name.clone(),
            score: entry.score,
            note: entry.note.clone(),
            confirmed: entry.confirmed,
            updated_at: Utc::now(),
        };
        match slots.iter_mut().find(|e| e.rater_name == entry.rater_name) {
            Some(existing) => *existing = row.clone(),
            None => slots.push(row.clone()),
        }
        Ok(row)
    }

    async fn confirm(&self, id: &CuratedSessionId) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        match sessions.get_mut(id) {
            Some(session) if session.is_active => {
                session.is_active = false;
                session.is_confirmed = true;
                session.ended_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn deactivate(&self, id: &CuratedSessionId) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        match sessions.get_mut(id) {
            Some(session) if session.is_active => {
                session.is_active = false;
                session.ended_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ============================================================================
// In-Memory Curated Ranking Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCuratedRankingRepository {
    rankings: Arc<RwLock<HashMap<PlayerId, CuratedRanking>>>,
}

impl InMemoryCuratedRankingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CuratedRankingRepository for InMemoryCuratedRankingRepository {
    async fn upsert(
        &self,
        player_id: &PlayerId,
        score: i32,
    ) -> Result<CuratedRanking, DomainError> {
        let row = CuratedRanking {
            player_id: *player_id,
            score,
            confirmed_at: Utc::now(),
        };
        self.rankings.write().unwrap().insert(*player_id, row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<CuratedRanking>, DomainError> {
        let mut rows: Vec<CuratedRanking> =
            self.rankings.read().unwrap().values().cloned().collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score).then(a.player_id.cmp(&b.player_id)));
        Ok(rows)
    }
}

// ============================================================================
// In-Memory Anomaly Skip Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryAnomalySkipRepository {
    skips: Arc<RwLock<HashSet<RatingId>>>,
}

impl InMemoryAnomalySkipRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnomalySkipRepository for InMemoryAnomalySkipRepository {
    async fn add(&self, rating_id: &RatingId) -> Result<(), DomainError> {
        self.skips.write().unwrap().insert(*rating_id);
        Ok(())
    }

    async fn remove(&self, rating_id: &RatingId) -> Result<(), DomainError> {
        self.skips.write().unwrap().remove(rating_id);
        Ok(())
    }

    async fn all(&self) -> Result<HashSet<RatingId>, DomainError> {
        Ok(self.skips.read().unwrap().clone())
    }
}
