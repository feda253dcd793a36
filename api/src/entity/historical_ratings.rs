//! SeaORM model for the `historical_ratings` table
//!
//! Frozen rows of one snapshot period. Written once, never updated.

use sea_orm::entity::prelude::*;

use crate::domain::entities::{HistoricalRating, PlayerId, SnapshotPeriodId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "historical_ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub period_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub player_id: Uuid,
    pub score: f64,
    pub rank: i32,
    pub rating_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for HistoricalRating {
    fn from(m: Model) -> Self {
        HistoricalRating {
            period_id: SnapshotPeriodId(m.period_id),
            player_id: PlayerId(m.player_id),
            score: m.score,
            rank: m.rank,
            rating_count: m.rating_count,
        }
    }
}
