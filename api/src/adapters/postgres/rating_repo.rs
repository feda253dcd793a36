//! PostgreSQL adapter for RatingRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{NewRating, PlayerId, RaterId, Rating, RatingId};
use crate::domain::ports::RatingRepository;
use crate::entity::{raters, ratings};
use crate::error::DomainError;

/// PostgreSQL implementation of RatingRepository
pub struct PostgresRatingRepository {
    db: DatabaseConnection,
}

impl PostgresRatingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn find_by_id(&self, id: &RatingId) -> Result<Option<Rating>, DomainError> {
        let result = ratings::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_player(&self, player_id: &PlayerId) -> Result<Vec<Rating>, DomainError> {
        let results = ratings::Entity::find()
            .filter(ratings::Column::PlayerId.eq(player_id.0))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_rater(&self, rater_id: &RaterId) -> Result<Vec<Rating>, DomainError> {
        let results = ratings::Entity::find()
            .filter(ratings::Column::RaterId.eq(rater_id.0))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_all(&self) -> Result<Vec<Rating>, DomainError> {
        let results = ratings::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn commit_batch(
        &self,
        rater_id: &RaterId,
        entries: &[NewRating],
    ) -> Result<Vec<Rating>, DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let now = Utc::now().fixed_offset();

        let mut saved = Vec::with_capacity(entries.len());
        for entry in entries {
            let existing = ratings::Entity::find()
                .filter(ratings::Column::RaterId.eq(rater_id.0))
                .filter(ratings::Column::PlayerId.eq(entry.player_id.0))
                .one(&txn)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;

            let result = match existing {
                Some(model) => {
                    let mut active: ratings::ActiveModel = model.into();
                    active.score = Set(entry.score);
                    active.note = Set(entry.note.clone());
                    active.rated_at = Set(Some(now));
                    active
                        .update(&txn)
                        .await
                        .map_err(|e| DomainError::Database(e.to_string()))?
                }
                None => {
                    ratings::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        rater_id: Set(rater_id.0),
                        player_id: Set(entry.player_id.0),
                        score: Set(entry.score),
                        note: Set(entry.note.clone()),
                        rated_at: Set(Some(now)),
                    }
                    .insert(&txn)
                    .await
                    .map_err(|e| DomainError::Database(e.to_string()))?
                }
            };
            saved.push(result.into());
        }

        // Part of the same transaction on purpose: the cooldown elsewhere
        // reads this timestamp and must never see a half-committed batch.
        raters::ActiveModel {
            id: Set(rater_id.0),
            last_rated_at: Set(Some(now)),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(saved)
    }
}
