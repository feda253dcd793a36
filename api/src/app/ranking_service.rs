//! Ranking service
//!
//! Produces the live per-category leaderboard: eligibility gate, weighted
//! aggregation with the fallback chain, deterministic rank assignment.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use crate::app::eligibility::eligible_rater_ids;
use crate::app::rating_config::RatingConfig;
use crate::app::scoring::{aggregate_score, rank_order, ranking_votes, ScoreSource};
use crate::domain::entities::{Category, Player, PlayerId, Rater, RaterId, Rating};
use crate::domain::ports::{PlayerRepository, RaterRepository, RatingRepository};
use crate::error::AppError;

/// One leaderboard row
#[derive(Debug, Clone, Serialize)]
pub struct RankedPlayer {
    pub player_id: PlayerId,
    pub gamertag: String,
    pub score: f64,
    pub rank: i32,
    pub rating_count: usize,
    pub source: ScoreSource,
}

/// Service for the live ranking read path
pub struct RankingService<PR, RR, GR>
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

impl<PR, RR, GR> RankingService<PR, RR, GR>
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

    /// The live leaderboard for one category.
    ///
    /// Eligibility is the expensive part (every rater x all their ratings),
    /// so it is computed exactly once per call and reused for every player.
    /// Nothing is cached across calls.
    pub async fn get_ranking(&self, category: Category) -> Result<Vec<RankedPlayer>, AppError> {
        let all_players = self.players.find_all().await?;
        let raters = self.raters.find_all().await?;
        let ratings = self.ratings.find_all().await?;

        let players_by_id: HashMap<PlayerId, Player> =
            all_players.iter().map(|p| (p.id, p.clone())).collect();
        let raters_by_id: HashMap<RaterId, Rater> =
            raters.iter().map(|r| (r.id, r.clone())).collect();
        let eligible: HashSet<RaterId> =
            eligible_rater_ids(&raters, &ratings, &players_by_id, &self.config);

        let mut by_player: HashMap<PlayerId, Vec<Rating>> = HashMap::new();
        for rating in ratings {
            by_player.entry(rating.player_id).or_default().push(rating);
        }

        let empty: Vec<Rating> = Vec::new();
        let mut scored: Vec<RankedPlayer> = all_players
            .iter()
            .filter(|p| p.category == category)
            .map(|player| {
                let player_ratings = by_player.get(&player.id).unwrap_or(&empty);
                let votes =
                    ranking_votes(player_ratings, &raters_by_id, &eligible, &self.config);
                let agg = aggregate_score(player, &votes, &self.config);
                RankedPlayer {
                    player_id: player.id,
                    gamertag: player.gamertag.clone(),
                    score: agg.score,
                    rank: 0,
                    rating_count: agg.rating_count,
                    source: agg.source,
                }
            })
            .collect();

        scored.sort_by(|a, b| rank_order((a.score, a.player_id), (b.score, b.player_id)));
        for (i, row) in scored.iter_mut().enumerate() {
            row.rank = i as i32 + 1;
        }

        tracing::debug!(
            category = %category,
            players = scored.len(),
            eligible_raters = eligible.len(),
            "ranking computed"
        );

        Ok(scored)
    }
}
