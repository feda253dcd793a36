//! PostgreSQL adapter for SnapshotRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    HistoricalRating, NewHistoricalRating, NewSnapshotPeriod, SnapshotPeriod, SnapshotPeriodId,
};
use crate::domain::ports::SnapshotRepository;
use crate::entity::{historical_ratings, snapshot_periods};
use crate::error::DomainError;

/// PostgreSQL implementation of SnapshotRepository
pub struct PostgresSnapshotRepository {
    db: DatabaseConnection,
}

impl PostgresSnapshotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SnapshotRepository for PostgresSnapshotRepository {
    async fn find_period_by_name(
        &self,
        name: &str,
    ) -> Result<Option<SnapshotPeriod>, DomainError> {
        let result = snapshot_periods::Entity::find()
            .filter(snapshot_periods::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list_periods(&self) -> Result<Vec<SnapshotPeriod>, DomainError> {
        let results = snapshot_periods::Entity::find()
            .order_by_asc(snapshot_periods::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(
        &self,
        period: &NewSnapshotPeriod,
        rows: &[NewHistoricalRating],
    ) -> Result<SnapshotPeriod, DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let now = Utc::now().fixed_offset();

        let created = snapshot_periods::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(period.name.clone()),
            starts_at: Set(period.starts_at.fixed_offset()),
            ends_at: Set(period.ends_at.fixed_offset()),
            created_at: Set(Some(now)),
        }
        .insert(&txn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        if !rows.is_empty() {
            let models: Vec<historical_ratings::ActiveModel> = rows
                .iter()
                .map(|row| historical_ratings::ActiveModel {
                    period_id: Set(created.id),
                    player_id: Set(row.player_id.0),
                    score: Set(row.score),
                    rank: Set(row.rank),
                    rating_count: Set(row.rating_count),
                })
                .collect();
            historical_ratings::Entity::insert_many(models)
                .exec(&txn)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(created.into())
    }

    async fn find_rows_by_period(
        &self,
        period_id: &SnapshotPeriodId,
    ) -> Result<Vec<HistoricalRating>, DomainError> {
        let results = historical_ratings::Entity::find()
            .filter(historical_ratings::Column::PeriodId.eq(period_id.0))
            .order_by_asc(historical_ratings::Column::Rank)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_all_rows(&self) -> Result<Vec<HistoricalRating>, DomainError> {
        let results = historical_ratings::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}
