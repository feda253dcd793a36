//! SeaORM model for the `snapshot_periods` table

use chrono::Utc;
use sea_orm::entity::prelude::*;

use crate::domain::entities::{SnapshotPeriod, SnapshotPeriodId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "snapshot_periods")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub starts_at: DateTimeWithTimeZone,
    pub ends_at: DateTimeWithTimeZone,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SnapshotPeriod {
    fn from(m: Model) -> Self {
        SnapshotPeriod {
            id: SnapshotPeriodId(m.id),
            name: m.name,
            starts_at: m.starts_at.with_timezone(&Utc),
            ends_at: m.ends_at.with_timezone(&Utc),
            created_at: m
                .created_at
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
