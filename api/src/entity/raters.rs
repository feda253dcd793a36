//! SeaORM model for the `raters` table

use chrono::Utc;
use sea_orm::entity::prelude::*;

use crate::domain::entities::{Rater, RaterId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "raters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub display_name: String,
    pub division: Option<String>,
    pub is_system: bool,
    pub last_rated_at: Option<DateTimeWithTimeZone>,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Rater {
    fn from(m: Model) -> Self {
        Rater {
            id: RaterId(m.id),
            display_name: m.display_name,
            division: m.division.and_then(|d| d.parse().ok()),
            is_system: m.is_system,
            last_rated_at: m.last_rated_at.map(|t| t.with_timezone(&Utc)),
            created_at: m
                .created_at
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
