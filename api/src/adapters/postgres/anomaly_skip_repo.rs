//! PostgreSQL adapter for AnomalySkipRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::collections::HashSet;

use crate::domain::entities::RatingId;
use crate::domain::ports::AnomalySkipRepository;
use crate::entity::anomaly_skips;
use crate::error::DomainError;

/// PostgreSQL implementation of AnomalySkipRepository
pub struct PostgresAnomalySkipRepository {
    db: DatabaseConnection,
}

impl PostgresAnomalySkipRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnomalySkipRepository for PostgresAnomalySkipRepository {
    async fn add(&self, rating_id: &RatingId) -> Result<(), DomainError> {
        let existing = anomaly_skips::Entity::find_by_id(rating_id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        if existing.is_some() {
            return Ok(());
        }

        anomaly_skips::ActiveModel {
            rating_id: Set(rating_id.0),
            created_at: Set(Some(Utc::now().fixed_offset())),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, rating_id: &RatingId) -> Result<(), DomainError> {
        // Deleting an absent row is success: idempotent delete.
        anomaly_skips::Entity::delete_by_id(rating_id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn all(&self) -> Result<HashSet<RatingId>, DomainError> {
        let results = anomaly_skips::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| RatingId(m.rating_id)).collect())
    }
}
