//! SeaORM model for the `curated_rankings` table
//!
//! One permanent row per player, overwritten on every confirmed session.

use chrono::Utc;
use sea_orm::entity::prelude::*;

use crate::domain::entities::{CuratedRanking, PlayerId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "curated_rankings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub player_id: Uuid,
    pub score: i32,
    pub confirmed_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CuratedRanking {
    fn from(m: Model) -> Self {
        CuratedRanking {
            player_id: PlayerId(m.player_id),
            score: m.score,
            confirmed_at: m
                .confirmed_at
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
