//! SeaORM model for the `ratings` table
//!
//! (rater_id, player_id) carries a unique index; the surrogate id exists so
//! the anomaly skip list can reference individual rows.

use chrono::Utc;
use sea_orm::entity::prelude::*;

use crate::domain::entities::{PlayerId, RaterId, Rating, RatingId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub rater_id: Uuid,
    pub player_id: Uuid,
    pub score: i32,
    pub note: Option<String>,
    pub rated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Rating {
    fn from(m: Model) -> Self {
        Rating {
            id: RatingId(m.id),
            rater_id: RaterId(m.rater_id),
            player_id: PlayerId(m.player_id),
            score: m.score,
            note: m.note,
            rated_at: m
                .rated_at
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
