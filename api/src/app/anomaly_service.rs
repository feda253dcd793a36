//! Anomaly detection service
//!
//! Batch scan over the whole store surfacing already-committed suspicious
//! ratings for human triage. O(players x ratings): runs only when a
//! moderator asks for it, never inline on a hot read path.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::app::rating_config::RatingConfig;
use crate::domain::entities::{
    AnomalyFlag, AnomalyKind, Rater, RaterId, Rating, RatingId,
};
use crate::domain::ports::{
    AnomalySkipRepository, PlayerRepository, RaterRepository, RatingRepository,
};
use crate::error::{AppError, DomainError};

/// Result of one full scan
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyReport {
    /// Boost flags first, then deviation flags by descending deviation.
    pub flags: Vec<AnomalyFlag>,
    pub players_scanned: usize,
    /// Players whose rating rows could not be attributed to a known rater.
    pub players_skipped: usize,
}

/// Service for the anomaly scan and its skip list
pub struct AnomalyService<PR, RR, GR, SR>
where
    PR: PlayerRepository,
    RR: RaterRepository,
    GR: RatingRepository,
    SR: AnomalySkipRepository,
{
    players: Arc<PR>,
    raters: Arc<RR>,
    ratings: Arc<GR>,
    skips: Arc<SR>,
    config: RatingConfig,
}

impl<PR, RR, GR, SR> AnomalyService<PR, RR, GR, SR>
where
    PR: PlayerRepository,
    RR: RaterRepository,
    GR: RatingRepository,
    SR: AnomalySkipRepository,
{
    pub fn new(players: Arc<PR>, raters: Arc<RR>, ratings: Arc<GR>, skips: Arc<SR>) -> Self {
        Self {
            players,
            raters,
            ratings,
            skips,
            config: RatingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RatingConfig) -> Self {
        self.config = config;
        self
    }

    /// Scan every player. A player with malformed data is skipped and
    /// counted; one bad row never fails the whole scan.
    pub async fn scan(&self) -> Result<AnomalyReport, AppError> {
        let players = self.players.find_all().await?;
        let raters = self.raters.find_all().await?;
        let ratings = self.ratings.find_all().await?;
        let skips = self.skips.all().await?;

        let raters_by_id: HashMap<RaterId, Rater> =
            raters.into_iter().map(|r| (r.id, r)).collect();

        let mut by_player: HashMap<_, Vec<Rating>> = HashMap::new();
        for rating in ratings {
            by_player.entry(rating.player_id).or_default().push(rating);
        }

        let mut boosts: Vec<AnomalyFlag> = Vec::new();
        let mut deviations: Vec<AnomalyFlag> = Vec::new();
        let mut players_scanned = 0usize;
        let mut players_skipped = 0usize;

        for player in &players {
            let Some(rows) = by_player.get(&player.id) else {
                players_scanned += 1;
                continue;
            };

            // Only attributable, real (non-system) ratings feed the detectors.
            let real: Vec<&Rating> = rows
                .iter()
                .filter(|r| {
                    raters_by_id
                        .get(&r.rater_id)
                        .map(|rater| !rater.is_system)
                        .unwrap_or(false)
                })
                .collect();

            let orphaned = rows
                .iter()
                .any(|r| !raters_by_id.contains_key(&r.rater_id));
            if orphaned && real.is_empty() {
                players_skipped += 1;
                continue;
            }

            players_scanned += 1;
            if real.is_empty() {
                continue;
            }

            let average =
                real.iter().map(|r| r.score as f64).sum::<f64>() / real.len() as f64;

            // Boost detector first; when it fires the deviation detector is
            // not run for this player at all.
            if real.len() < self.config.boost_flag_max_ratings
                && average >= self.config.boost_flag_min_average
            {
                for rating in &real {
                    if skips.contains(&rating.id) {
                        continue;
                    }
                    boosts.push(flag(
                        AnomalyKind::SuspiciousBoost,
                        rating,
                        average,
                        &real,
                    ));
                }
                continue;
            }

            if real.len() >= 2 {
                for rating in &real {
                    let deviation = (rating.score as f64 - average).abs();
                    if deviation >= self.config.anomaly_deviation_threshold
                        && !skips.contains(&rating.id)
                    {
                        deviations.push(flag(AnomalyKind::Deviation, rating, average, &real));
                    }
                }
            }
        }

        // Deterministic output: boosts by average then rating id, deviation
        // flags by descending magnitude.
        boosts.sort_by(|a, b| {
            b.average
                .partial_cmp(&a.average)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.rating_id.0.cmp(&b.rating_id.0))
        });
        deviations.sort_by(|a, b| {
            b.deviation
                .partial_cmp(&a.deviation)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.rating_id.0.cmp(&b.rating_id.0))
        });

        let mut flags = boosts;
        flags.append(&mut deviations);

        tracing::info!(
            flags = flags.len(),
            players_scanned,
            players_skipped,
            "anomaly scan finished"
        );

        Ok(AnomalyReport {
            flags,
            players_scanned,
            players_skipped,
        })
    }

    /// Mark a flag as reviewed-not-a-problem. The rating must exist; the
    /// skip itself is idempotent and never expires.
    pub async fn skip(&self, rating_id: &RatingId) -> Result<(), AppError> {
        self.ratings
            .find_by_id(rating_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Rating not found: {}", rating_id)))?;
        self.skips.add(rating_id).await?;
        tracing::info!(rating_id = %rating_id, "anomaly flag skipped");
        Ok(())
    }

    /// Remove a rating from the skip list so it can be flagged again.
    /// Removing an absent entry is success (idempotent delete).
    pub async fn unskip(&self, rating_id: &RatingId) -> Result<(), AppError> {
        self.skips.remove(rating_id).await?;
        Ok(())
    }
}

fn flag(kind: AnomalyKind, rating: &Rating, average: f64, real: &[&Rating]) -> AnomalyFlag {
    let mut peers: Vec<i32> = real
        .iter()
        .filter(|r| r.id != rating.id)
        .map(|r| r.score)
        .collect();
    peers.sort_unstable();
    AnomalyFlag {
        rating_id: rating.id,
        kind,
        player_id: rating.player_id,
        rater_id: rating.rater_id,
        score: rating.score,
        average,
        deviation: (rating.score as f64 - average).abs(),
        peers,
    }
}
