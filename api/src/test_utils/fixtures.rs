//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{
    Category, Division, Player, PlayerId, Rater, RaterId, Rating, RatingId,
};
use crate::test_utils::{InMemoryPlayerRepository, InMemoryRatingRepository};

fn short_tag() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Create a test player in a specific category, no division
pub fn test_player_in_category(category: Category) -> Player {
    Player {
        id: PlayerId::new(),
        gamertag: format!("player-{}", short_tag()),
        category,
        is_legend: false,
        division: None,
        clan_tag: None,
        created_at: Utc::now(),
    }
}

/// Create a test outfield player with a specific division
pub fn test_player_with_division(division: Option<Division>) -> Player {
    Player {
        division,
        ..test_player_in_category(Category::Outfield)
    }
}

/// Create a legend in a specific category
pub fn test_legend(category: Category) -> Player {
    Player {
        is_legend: true,
        ..test_player_in_category(category)
    }
}

/// Create a real rater with no division (floor vote weight)
pub fn test_rater() -> Rater {
    Rater {
        id: RaterId::new(),
        display_name: format!("rater-{}", short_tag()),
        division: None,
        is_system: false,
        last_rated_at: None,
        created_at: Utc::now(),
    }
}

/// Create a real rater with a specific division
pub fn test_rater_with_division(division: Option<Division>) -> Rater {
    Rater {
        division,
        ..test_rater()
    }
}

/// Create a synthetic system rater (seed scores only)
pub fn test_system_rater() -> Rater {
    Rater {
        display_name: format!("seed-{}", short_tag()),
        is_system: true,
        ..test_rater()
    }
}

/// Create a rating row with default note and timestamp
pub fn test_rating(rater_id: RaterId, player_id: PlayerId, score: i32) -> Rating {
    Rating {
        id: RatingId::new(),
        rater_id,
        player_id,
        score,
        note: None,
        rated_at: Utc::now(),
    }
}

/// Seed enough filler players and ratings for `rater` to pass every
/// category minimum of the reference configuration (20 outfield,
/// 10 goalkeeper, 10 manager, all scored 75).
pub fn rate_enough_to_qualify(
    players: &InMemoryPlayerRepository,
    ratings: &InMemoryRatingRepository,
    rater: &Rater,
) {
    let quota = [
        (Category::Outfield, 20),
        (Category::Goalkeeper, 10),
        (Category::Manager, 10),
    ];
    for (category, n) in quota {
        for _ in 0..n {
            let filler = test_player_in_category(category);
            players.insert(filler.clone());
            ratings.put(rater.id, filler.id, 75);
        }
    }
}
