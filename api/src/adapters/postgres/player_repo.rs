//! PostgreSQL adapter for PlayerRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::entities::{Category, Player, PlayerId};
use crate::domain::ports::PlayerRepository;
use crate::entity::players;
use crate::error::DomainError;

/// PostgreSQL implementation of PlayerRepository
pub struct PostgresPlayerRepository {
    db: DatabaseConnection,
}

impl PostgresPlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>, DomainError> {
        let result = players::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Player>, DomainError> {
        let results = players::Entity::find()
            .filter(players::Column::Category.eq(category.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_all(&self) -> Result<Vec<Player>, DomainError> {
        let results = players::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}
