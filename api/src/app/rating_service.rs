//! Rating submission service
//!
//! The write path: scale validation, the deviation guard, then an atomic
//! batch upsert. The guard bounds how far a single vote can drag an
//! established player from the current average.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::app::rating_config::RatingConfig;
use crate::app::scoring::{deviation_band, guard_average};
use crate::domain::entities::{
    score_in_scale, NewRating, Rater, RaterId, Rating, MAX_SCORE, MIN_SCORE,
};
use crate::domain::ports::{PlayerRepository, RaterRepository, RatingRepository};
use crate::error::{AppError, DomainError, ScoreViolation};

/// Service for the rating write path
pub struct RatingService<PR, RR, GR>
where
    PR: PlayerRepository,
    RR: RaterRepository,
    GR: RatingRepository,
{
    players: Arc<PR>,
    raters: Arc<RR>,
    ratings: Arc<GR>,
    config: RatingConfig,
}

impl<PR, RR, GR> RatingService<PR, RR, GR>
where
    PR: PlayerRepository,
    RR: RaterRepository,
    GR: RatingRepository,
{
    pub fn new(players: Arc<PR>, raters: Arc<RR>, ratings: Arc<GR>) -> Self {
        Self {
            players,
            raters,
            ratings,
            config: RatingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RatingConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate and commit one rater's batch.
    ///
    /// The whole batch is validated before anything is written. Scale
    /// violations reject immediately; deviation violations are collected
    /// across all entries so the rater sees every failing player at once.
    /// On success every row upserts in one store transaction.
    pub async fn submit_ratings(
        &self,
        rater_id: &RaterId,
        entries: Vec<NewRating>,
    ) -> Result<Vec<Rating>, AppError> {
        if entries.is_empty() {
            return Err(DomainError::Validation("empty rating batch".to_string()).into());
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.player_id) {
                return Err(DomainError::Validation(format!(
                    "player {} appears more than once in the batch",
                    entry.player_id
                ))
                .into());
            }
        }

        // Scale check first: no averages are computed for a malformed batch.
        for entry in &entries {
            if !score_in_scale(entry.score) {
                return Err(DomainError::Validation(format!(
                    "score {} for player {} is outside the {}-{} scale",
                    entry.score, entry.player_id, MIN_SCORE, MAX_SCORE
                ))
                .into());
            }
        }

        let rater = self
            .raters
            .find_by_id(rater_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Rater not found: {}", rater_id)))?;

        let all_raters = self.raters.find_all().await?;
        let raters_by_id: HashMap<RaterId, Rater> =
            all_raters.into_iter().map(|r| (r.id, r)).collect();

        let mut violations: Vec<ScoreViolation> = Vec::new();
        for entry in &entries {
            let player = self
                .players
                .find_by_id(&entry.player_id)
                .await?
                .ok_or_else(|| {
                    DomainError::NotFound(format!("Player not found: {}", entry.player_id))
                })?;

            let player_ratings = self.ratings.find_by_player(&player.id).await?;
            // Raw view: everyone else's ratings, eligibility ignored.
            let (average, count) =
                guard_average(&player_ratings, rater_id, &raters_by_id, &self.config);

            if count < self.config.established_rating_count {
                continue;
            }
            let Some(average) = average else { continue };

            let (low, high) = deviation_band(average, &self.config);
            if entry.score < low || entry.score > high {
                violations.push(ScoreViolation {
                    player_id: player.id,
                    message: format!(
                        "score {} is outside the allowed band {}-{} \
                         (community average {:.1}, max deviation {})",
                        entry.score, low, high, average, self.config.max_deviation
                    ),
                });
            }
        }

        if !violations.is_empty() {
            tracing::info!(
                rater_id = %rater.id,
                entries = entries.len(),
                violations = violations.len(),
                "rating batch rejected by deviation guard"
            );
            return Err(AppError::RatingRejected(violations));
        }

        let saved = self.ratings.commit_batch(rater_id, &entries).await?;

        tracing::info!(
            rater_id = %rater.id,
            count = saved.len(),
            "rating batch committed"
        );

        Ok(saved)
    }
}
