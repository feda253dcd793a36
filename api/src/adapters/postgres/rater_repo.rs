//! PostgreSQL adapter for RaterRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::entities::{Rater, RaterId};
use crate::domain::ports::RaterRepository;
use crate::entity::raters;
use crate::error::DomainError;

/// PostgreSQL implementation of RaterRepository
pub struct PostgresRaterRepository {
    db: DatabaseConnection,
}

impl PostgresRaterRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RaterRepository for PostgresRaterRepository {
    async fn find_by_id(&self, id: &RaterId) -> Result<Option<Rater>, DomainError> {
        let result = raters::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<Rater>, DomainError> {
        let results = raters::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}
