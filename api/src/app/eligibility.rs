//! Rater eligibility
//!
//! Classifies raters as counted or not for the global ranking. Pure
//! functions over query results; nothing is cached across requests. Callers
//! compute the eligible set once per aggregation call and reuse it for
//! every player in that call.

use std::collections::{HashMap, HashSet};

use crate::app::rating_config::RatingConfig;
use crate::domain::entities::{Category, Player, PlayerId, Rater, RaterId, Rating};

/// How many players of each category a rater has rated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub outfield: usize,
    pub goalkeeper: usize,
    pub manager: usize,
}

impl CategoryCounts {
    fn bump(&mut self, category: Category) {
        match category {
            Category::Outfield => self.outfield += 1,
            Category::Goalkeeper => self.goalkeeper += 1,
            Category::Manager => self.manager += 1,
        }
    }
}

/// Count a rater's ratings per player category. Ratings on players missing
/// from the map are ignored.
pub fn category_counts(
    ratings: &[Rating],
    players_by_id: &HashMap<PlayerId, Player>,
) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for rating in ratings {
        if let Some(player) = players_by_id.get(&rating.player_id) {
            counts.bump(player.category);
        }
    }
    counts
}

/// All-or-nothing eligibility: every category minimum must be met at once.
/// A rater close on two categories but short on the third counts nowhere.
pub fn meets_minimums(counts: CategoryCounts, config: &RatingConfig) -> bool {
    counts.outfield >= config.eligibility_minimums.outfield
        && counts.goalkeeper >= config.eligibility_minimums.goalkeeper
        && counts.manager >= config.eligibility_minimums.manager
}

/// Classify every rater. System raters are always eligible; real raters
/// must meet all category minimums simultaneously.
pub fn eligible_rater_ids(
    raters: &[Rater],
    ratings: &[Rating],
    players_by_id: &HashMap<PlayerId, Player>,
    config: &RatingConfig,
) -> HashSet<RaterId> {
    let mut by_rater: HashMap<RaterId, Vec<Rating>> = HashMap::new();
    for rating in ratings {
        by_rater
            .entry(rating.rater_id)
            .or_default()
            .push(rating.clone());
    }

    raters
        .iter()
        .filter(|rater| {
            if rater.is_system {
                return true;
            }
            let counts = by_rater
                .get(&rater.id)
                .map(|rs| category_counts(rs, players_by_id))
                .unwrap_or_default();
            meets_minimums(counts, config)
        })
        .map(|rater| rater.id)
        .collect()
}
