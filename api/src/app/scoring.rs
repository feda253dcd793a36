//! Score aggregation primitives
//!
//! Pure numeric logic shared by the ranking, guard and snapshot paths.
//!
//! There are deliberately THREE distinct rating populations here and they
//! must not be unified:
//! - `ranking_votes`: eligibility-filtered view used for the live ranking.
//! - `snapshot_votes`: raw real/system split used at snapshot time,
//!   unfiltered by eligibility.
//! - `guard_average`: every rating except the submitter's own, regardless
//!   of eligibility, used by the deviation guard.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::app::rating_config::RatingConfig;
use crate::domain::entities::{
    Division, Player, PlayerId, Rater, RaterId, Rating, MAX_SCORE, MIN_SCORE,
};

/// One score with its rater's division weight applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedVote {
    pub score: i32,
    pub weight: f64,
}

/// Which branch of the fallback chain produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Weighted mean of eligible real ratings
    Community,
    /// No real ratings; fixed default for the player's division
    DivisionDefault,
    /// No real ratings, no division; weighted mean of system seeds
    SystemSeed,
    /// Nothing at all
    Neutral,
}

/// Aggregated score for one player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateScore {
    pub score: f64,
    /// Number of ratings that contributed (zero for default branches).
    pub rating_count: usize,
    pub source: ScoreSource,
}

/// Ratings split into real votes and system seeds
#[derive(Debug, Clone, Default)]
pub struct SplitVotes {
    pub real: Vec<WeightedVote>,
    pub system: Vec<WeightedVote>,
}

fn division_of(rater_id: &RaterId, raters_by_id: &HashMap<RaterId, Rater>) -> Option<Division> {
    raters_by_id.get(rater_id).and_then(|r| r.division)
}

/// Weighted mean. Falls back to the plain unweighted mean if the weight sum
/// is zero (cannot happen with the floor weight; kept as a guard).
pub fn weighted_mean(votes: &[WeightedVote]) -> Option<f64> {
    if votes.is_empty() {
        return None;
    }
    let denominator: f64 = votes.iter().map(|v| v.weight).sum();
    if denominator > 0.0 {
        let numerator: f64 = votes.iter().map(|v| v.score as f64 * v.weight).sum();
        Some(numerator / denominator)
    } else {
        let sum: f64 = votes.iter().map(|v| v.score as f64).sum();
        Some(sum / votes.len() as f64)
    }
}

/// Ranking view (§ live leaderboard): real votes are restricted to
/// eligible, non-system raters. Ratings from unknown raters are dropped.
pub fn ranking_votes(
    ratings: &[Rating],
    raters_by_id: &HashMap<RaterId, Rater>,
    eligible: &HashSet<RaterId>,
    config: &RatingConfig,
) -> SplitVotes {
    let mut votes = SplitVotes::default();
    for rating in ratings {
        let Some(rater) = raters_by_id.get(&rating.rater_id) else {
            continue;
        };
        let vote = WeightedVote {
            score: rating.score,
            weight: config.weight_for(rater.division),
        };
        if rater.is_system {
            votes.system.push(vote);
        } else if eligible.contains(&rater.id) {
            votes.real.push(vote);
        }
    }
    votes
}

/// Snapshot view: the raw real/system split, unfiltered by eligibility.
pub fn snapshot_votes(
    ratings: &[Rating],
    raters_by_id: &HashMap<RaterId, Rater>,
    config: &RatingConfig,
) -> SplitVotes {
    let mut votes = SplitVotes::default();
    for rating in ratings {
        let Some(rater) = raters_by_id.get(&rating.rater_id) else {
            continue;
        };
        let vote = WeightedVote {
            score: rating.score,
            weight: config.weight_for(rater.division),
        };
        if rater.is_system {
            votes.system.push(vote);
        } else {
            votes.real.push(vote);
        }
    }
    votes
}

/// Guard view: weighted average and raw count over every rating on the
/// player except the submitting rater's own row. All raters count here,
/// whatever their eligibility; this is a different population than the
/// ranking view on purpose.
pub fn guard_average(
    ratings: &[Rating],
    exclude: &RaterId,
    raters_by_id: &HashMap<RaterId, Rater>,
    config: &RatingConfig,
) -> (Option<f64>, usize) {
    let votes: Vec<WeightedVote> = ratings
        .iter()
        .filter(|r| r.rater_id != *exclude)
        .map(|r| WeightedVote {
            score: r.score,
            weight: config.weight_for(division_of(&r.rater_id, raters_by_id)),
        })
        .collect();
    (weighted_mean(&votes), votes.len())
}

/// The fallback chain, first match wins:
/// real votes -> division default -> system seeds -> neutral.
pub fn aggregate_score(
    player: &Player,
    votes: &SplitVotes,
    config: &RatingConfig,
) -> AggregateScore {
    if let Some(score) = weighted_mean(&votes.real) {
        return AggregateScore {
            score,
            rating_count: votes.real.len(),
            source: ScoreSource::Community,
        };
    }
    if let Some(division) = player.division {
        return AggregateScore {
            score: config.default_score_for(division),
            rating_count: 0,
            source: ScoreSource::DivisionDefault,
        };
    }
    if let Some(score) = weighted_mean(&votes.system) {
        return AggregateScore {
            score,
            rating_count: votes.system.len(),
            source: ScoreSource::SystemSeed,
        };
    }
    AggregateScore {
        score: config.neutral_default,
        rating_count: 0,
        source: ScoreSource::Neutral,
    }
}

/// Accepted band for a new vote on an established player: floor on the low
/// side, ceil on the high side, clamped to the card scale.
pub fn deviation_band(average: f64, config: &RatingConfig) -> (i32, i32) {
    let low = (average - config.max_deviation).floor() as i32;
    let high = (average + config.max_deviation).ceil() as i32;
    (low.max(MIN_SCORE), high.min(MAX_SCORE))
}

/// Ranking comparator: descending score, ties broken by ascending player
/// id so ordering is deterministic across stores and restarts.
pub fn rank_order(a: (f64, PlayerId), b: (f64, PlayerId)) -> Ordering {
    b.0.partial_cmp(&a.0)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.1.cmp(&b.1))
}
