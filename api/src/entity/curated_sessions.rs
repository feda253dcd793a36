//! SeaORM model for the `curated_sessions` table
//!
//! At most one row has is_active = true at any moment; the adapter keeps
//! that invariant with a conditional update inside the create transaction.

use chrono::Utc;
use sea_orm::entity::prelude::*;

use crate::domain::entities::{CuratedSession, CuratedSessionId, PlayerId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "curated_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub player_id: Uuid,
    pub is_active: bool,
    pub is_confirmed: bool,
    pub created_at: Option<DateTimeWithTimeZone>,
    pub ended_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CuratedSession {
    fn from(m: Model) -> Self {
        CuratedSession {
            id: CuratedSessionId(m.id),
            player_id: PlayerId(m.player_id),
            is_active: m.is_active,
            is_confirmed: m.is_confirmed,
            created_at: m
                .created_at
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
            ended_at: m.ended_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}
