//! Snapshot and all-time ranking service
//!
//! Snapshots freeze the aggregator's output per named period; the all-time
//! view recombines frozen periods into a lifetime ranking, except for
//! legends, whose entry is always the live aggregate.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::eligibility::eligible_rater_ids;
use crate::app::rating_config::RatingConfig;
use crate::app::scoring::{
    aggregate_score, rank_order, ranking_votes, snapshot_votes,
};
use crate::domain::entities::{
    Category, HistoricalRating, NewHistoricalRating, NewSnapshotPeriod, Player, PlayerId, Rater,
    RaterId, Rating, SnapshotPeriod,
};
use crate::domain::ports::{
    PlayerRepository, RaterRepository, RatingRepository, SnapshotRepository,
};
use crate::error::{AppError, DomainError};

/// The synthetic period label attached to a legend's live score in the
/// all-time view.
pub const LIVE_PERIOD_LABEL: &str = "current";

/// One score a player earned in one period
#[derive(Debug, Clone, Serialize)]
pub struct PeriodScore {
    pub period: String,
    pub score: f64,
}

/// One row of the merged all-time ranking
#[derive(Debug, Clone, Serialize)]
pub struct AllTimeEntry {
    pub player_id: PlayerId,
    pub gamertag: String,
    pub score: f64,
    pub rank: i32,
    pub period_count: usize,
    pub is_legend: bool,
    pub history: Vec<PeriodScore>,
}

/// Service for snapshots and the all-time merge
pub struct SnapshotService<PR, RR, GR, SR>
where
    PR: PlayerRepository,
    RR: RaterRepository,
    GR: RatingRepository,
    SR: SnapshotRepository,
{
    players: Arc<PR>,
    raters: Arc<RR>,
    ratings: Arc<GR>,
    snapshots: Arc<SR>,
    config: RatingConfig,
}

impl<PR, RR, GR, SR> SnapshotService<PR, RR, GR, SR>
where
    PR: PlayerRepository,
    RR: RaterRepository,
    GR: RatingRepository,
    SR: SnapshotRepository,
{
    pub fn new(players: Arc<PR>, raters: Arc<RR>, ratings: Arc<GR>, snapshots: Arc<SR>) -> Self {
        Self {
            players,
            raters,
            ratings,
            snapshots,
            config: RatingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RatingConfig) -> Self {
        self.config = config;
        self
    }

    /// Freeze the current ranking under a unique period name.
    ///
    /// The snapshot uses the raw real/system split, not the eligibility
    /// gate: every real rating counts here. Rows never change after this.
    pub async fn create_snapshot(
        &self,
        name: &str,
        starts_at: Option<DateTime<Utc>>,
        ends_at: Option<DateTime<Utc>>,
    ) -> Result<(SnapshotPeriod, usize), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("period name must not be empty".to_string()).into());
        }
        if self.snapshots.find_period_by_name(name).await?.is_some() {
            return Err(
                DomainError::AlreadyExists(format!("snapshot period '{}' already exists", name))
                    .into(),
            );
        }

        let players = self.players.find_all().await?;
        let raters = self.raters.find_all().await?;
        let ratings = self.ratings.find_all().await?;

        let raters_by_id: HashMap<RaterId, Rater> =
            raters.into_iter().map(|r| (r.id, r)).collect();
        let mut by_player: HashMap<PlayerId, Vec<Rating>> = HashMap::new();
        for rating in ratings {
            by_player.entry(rating.player_id).or_default().push(rating);
        }

        let empty: Vec<Rating> = Vec::new();
        let mut scored: Vec<(PlayerId, f64, usize)> = players
            .iter()
            .map(|player| {
                let player_ratings = by_player.get(&player.id).unwrap_or(&empty);
                let votes = snapshot_votes(player_ratings, &raters_by_id, &self.config);
                let agg = aggregate_score(player, &votes, &self.config);
                (player.id, agg.score, agg.rating_count)
            })
            .collect();
        scored.sort_by(|a, b| rank_order((a.1, a.0), (b.1, b.0)));

        let rows: Vec<NewHistoricalRating> = scored
            .iter()
            .enumerate()
            .map(|(i, (player_id, score, count))| NewHistoricalRating {
                player_id: *player_id,
                score: *score,
                rank: i as i32 + 1,
                rating_count: *count as i32,
            })
            .collect();

        let ends_at = ends_at.unwrap_or_else(Utc::now);
        let starts_at = match starts_at {
            Some(t) => t,
            None => {
                // Default range picks up where the last period stopped.
                let periods = self.snapshots.list_periods().await?;
                periods.last().map(|p| p.ends_at).unwrap_or(ends_at)
            }
        };

        let period = self
            .snapshots
            .create(
                &NewSnapshotPeriod {
                    name: name.to_string(),
                    starts_at,
                    ends_at,
                },
                &rows,
            )
            .await?;

        tracing::info!(
            period = %period.name,
            rows = rows.len(),
            "snapshot created"
        );

        Ok((period, rows.len()))
    }

    /// All periods, oldest first.
    pub async fn list_periods(&self) -> Result<Vec<SnapshotPeriod>, AppError> {
        Ok(self.snapshots.list_periods().await?)
    }

    /// One period's frozen rows, in stored rank order.
    pub async fn period_rows(
        &self,
        name: &str,
    ) -> Result<(SnapshotPeriod, Vec<HistoricalRating>), AppError> {
        let period = self
            .snapshots
            .find_period_by_name(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("snapshot period '{}' not found", name)))?;
        let rows = self.snapshots.find_rows_by_period(&period.id).await?;
        Ok((period, rows))
    }

    /// The lifetime ranking across all periods.
    ///
    /// An ordinary player's all-time score is the plain mean of its
    /// per-period scores. A legend's frozen rows are discarded and replaced
    /// by one live eligibility-filtered aggregate, so legends always move
    /// with current votes. Ranks are recomputed on every read and never
    /// persisted.
    pub async fn all_time_ranking(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<AllTimeEntry>, AppError> {
        let periods = self.snapshots.list_periods().await?;
        let rows = self.snapshots.find_all_rows().await?;
        let players = self.players.find_all().await?;
        let raters = self.raters.find_all().await?;
        let ratings = self.ratings.find_all().await?;

        let period_order: HashMap<_, (usize, String)> = periods
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, (i, p.name.clone())))
            .collect();

        let players_by_id: HashMap<PlayerId, Player> =
            players.iter().map(|p| (p.id, p.clone())).collect();
        let raters_by_id: HashMap<RaterId, Rater> =
            raters.iter().map(|r| (r.id, r.clone())).collect();
        let eligible: HashSet<RaterId> =
            eligible_rater_ids(&raters, &ratings, &players_by_id, &self.config);

        let mut ratings_by_player: HashMap<PlayerId, Vec<Rating>> = HashMap::new();
        for rating in ratings {
            ratings_by_player
                .entry(rating.player_id)
                .or_default()
                .push(rating);
        }
        let mut rows_by_player: HashMap<PlayerId, Vec<&HistoricalRating>> = HashMap::new();
        for row in &rows {
            rows_by_player.entry(row.player_id).or_default().push(row);
        }

        let empty: Vec<Rating> = Vec::new();
        let mut entries: Vec<AllTimeEntry> = Vec::new();
        for player in &players {
            if let Some(wanted) = category {
                if player.category != wanted {
                    continue;
                }
            }

            if player.is_legend {
                // History discarded: one synthetic live period.
                let player_ratings = ratings_by_player.get(&player.id).unwrap_or(&empty);
                let votes =
                    ranking_votes(player_ratings, &raters_by_id, &eligible, &self.config);
                let agg = aggregate_score(player, &votes, &self.config);
                entries.push(AllTimeEntry {
                    player_id: player.id,
                    gamertag: player.gamertag.clone(),
                    score: agg.score,
                    rank: 0,
                    period_count: 1,
                    is_legend: true,
                    history: vec![PeriodScore {
                        period: LIVE_PERIOD_LABEL.to_string(),
                        score: agg.score,
                    }],
                });
                continue;
            }

            let Some(player_rows) = rows_by_player.get(&player.id) else {
                continue;
            };
            let mut history: Vec<(usize, PeriodScore)> = player_rows
                .iter()
                .filter_map(|row| {
                    period_order.get(&row.period_id).map(|(i, name)| {
                        (
                            *i,
                            PeriodScore {
                                period: name.clone(),
                                score: row.score,
                            },
                        )
                    })
                })
                .collect();
            if history.is_empty() {
                continue;
            }
            history.sort_by_key(|(i, _)| *i);
            let history: Vec<PeriodScore> = history.into_iter().map(|(_, s)| s).collect();
            let score =
                history.iter().map(|h| h.score).sum::<f64>() / history.len() as f64;
            entries.push(AllTimeEntry {
                player_id: player.id,
                gamertag: player.gamertag.clone(),
                score,
                rank: 0,
                period_count: history.len(),
                is_legend: false,
                history,
            });
        }

        entries.sort_by(|a, b| rank_order((a.score, a.player_id), (b.score, b.player_id)));
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.rank = i as i32 + 1;
        }

        Ok(entries)
    }
}
