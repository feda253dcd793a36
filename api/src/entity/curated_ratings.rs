//! SeaORM model for the `curated_ratings` table
//!
//! One named expert slot per (session, rater_name).

use chrono::Utc;
use sea_orm::entity::prelude::*;

use crate::domain::entities::{CuratedEntry, CuratedSessionId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "curated_ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub session_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub rater_name: String,
    pub score: Option<i32>,
    pub note: Option<String>,
    pub confirmed: bool,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CuratedEntry {
    fn from(m: Model) -> Self {
        CuratedEntry {
            session_id: CuratedSessionId(m.session_id),
            rater_name: m.rater_name,
            score: m.score,
            note: m.note,
            confirmed: m.confirmed,
            updated_at: m
                .updated_at
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
