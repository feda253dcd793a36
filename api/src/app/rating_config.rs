//! Rating engine configuration
//!
//! Every threshold, weight and default used by the aggregation, guard and
//! anomaly components lives here as configuration with reference defaults,
//! not as scattered constants.

use crate::domain::entities::{Division, MAX_SCORE, MIN_SCORE};

/// Per-category minimum rating counts for rater eligibility.
///
/// A real rater counts toward the global ranking only when ALL three
/// minimums are met simultaneously; there is no per-category eligibility.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityMinimums {
    pub outfield: usize,
    pub goalkeeper: usize,
    pub manager: usize,
}

/// Tunables for the rating engine
#[derive(Debug, Clone)]
pub struct RatingConfig {
    pub eligibility_minimums: EligibilityMinimums,
    /// Vote weight per rater division, top first. Monotonically
    /// non-increasing; the unranked weight is the floor and is never zero.
    pub weight_elite: f64,
    pub weight_first: f64,
    pub weight_second: f64,
    pub weight_third: f64,
    pub weight_unranked: f64,
    /// Default score per player division when no real ratings exist.
    /// Strictly decreasing with division rank.
    pub default_elite: f64,
    pub default_first: f64,
    pub default_second: f64,
    pub default_third: f64,
    /// Last-resort score when a player has no ratings and no division.
    pub neutral_default: f64,
    /// Ratings needed (excluding the submitter's own) before the deviation
    /// guard is enforced on new votes.
    pub established_rating_count: usize,
    /// Maximum allowed distance from the current average for a new vote on
    /// an established player.
    pub max_deviation: f64,
    /// Suspicious-boost detector: flag when a player has fewer than this
    /// many real ratings...
    pub boost_flag_max_ratings: usize,
    /// ...averaging at least this.
    pub boost_flag_min_average: f64,
    /// Deviation detector: flag a rating at least this far from the
    /// player's simple average.
    pub anomaly_deviation_threshold: f64,
    /// Named expert slots per curated session.
    pub max_curated_slots: usize,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            eligibility_minimums: EligibilityMinimums {
                outfield: 20,
                goalkeeper: 10,
                manager: 10,
            },
            weight_elite: 1.0,
            weight_first: 0.9,
            weight_second: 0.75,
            weight_third: 0.6,
            weight_unranked: 0.55,
            default_elite: 82.0,
            default_first: 75.0,
            default_second: 68.0,
            default_third: 62.0,
            neutral_default: 65.0,
            established_rating_count: 5,
            max_deviation: 15.0,
            boost_flag_max_ratings: 3,
            boost_flag_min_average: 90.0,
            anomaly_deviation_threshold: 10.0,
            max_curated_slots: 10,
        }
    }
}

impl RatingConfig {
    /// Vote weight for a rater's division. Unranked raters get the floor
    /// weight, never zero.
    pub fn weight_for(&self, division: Option<Division>) -> f64 {
        match division {
            Some(Division::Elite) => self.weight_elite,
            Some(Division::First) => self.weight_first,
            Some(Division::Second) => self.weight_second,
            Some(Division::Third) => self.weight_third,
            None => self.weight_unranked,
        }
    }

    /// Default score for an unrated player with a known division.
    pub fn default_score_for(&self, division: Division) -> f64 {
        match division {
            Division::Elite => self.default_elite,
            Division::First => self.default_first,
            Division::Second => self.default_second,
            Division::Third => self.default_third,
        }
    }

    /// User-facing policy text for the deviation guard. Interpolates the
    /// live bound so help text cannot drift from the enforced value.
    pub fn policy_text(&self) -> String {
        format!(
            "Votes on established players (rated {} times or more) must stay \
             within {} points of the current community average. All scores \
             are on the {}-{} scale.",
            self.established_rating_count, self.max_deviation, MIN_SCORE, MAX_SCORE
        )
    }
}
