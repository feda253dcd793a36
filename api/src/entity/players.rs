//! SeaORM model for the `players` table

use chrono::Utc;
use sea_orm::entity::prelude::*;

use crate::domain::entities::{Category, Player, PlayerId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub gamertag: String,
    pub category: String,
    pub is_legend: bool,
    pub division: Option<String>,
    pub clan_tag: Option<String>,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Player {
    fn from(m: Model) -> Self {
        Player {
            id: PlayerId(m.id),
            gamertag: m.gamertag,
            category: m.category.parse().unwrap_or(Category::Outfield),
            is_legend: m.is_legend,
            division: m.division.and_then(|d| d.parse().ok()),
            clan_tag: m.clan_tag,
            created_at: m
                .created_at
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
