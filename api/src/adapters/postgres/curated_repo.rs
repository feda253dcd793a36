//! PostgreSQL adapters for the curated session tables
//!
//! The single-active invariant lives in SQL: `create_active` runs
//! "deactivate where active" and the insert inside one transaction, and
//! the terminal transitions are conditional updates on `is_active`, so a
//! session can never be confirmed after being superseded even across
//! server instances.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    CuratedEntry, CuratedRanking, CuratedSession, CuratedSessionId, NewCuratedEntry, PlayerId,
};
use crate::domain::ports::{CuratedRankingRepository, CuratedSessionRepository};
use crate::entity::{curated_rankings, curated_ratings, curated_sessions};
use crate::error::DomainError;

/// PostgreSQL implementation of CuratedSessionRepository
pub struct PostgresCuratedSessionRepository {
    db: DatabaseConnection,
}

impl PostgresCuratedSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CuratedSessionRepository for PostgresCuratedSessionRepository {
    async fn find_active(&self) -> Result<Option<CuratedSession>, DomainError> {
        let result = curated_sessions::Entity::find()
            .filter(curated_sessions::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_id(
        &self,
        id: &CuratedSessionId,
    ) -> Result<Option<CuratedSession>, DomainError> {
        let result = curated_sessions::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create_active(&self, player_id: &PlayerId) -> Result<CuratedSession, DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let now = Utc::now().fixed_offset();

        curated_sessions::Entity::update_many()
            .col_expr(curated_sessions::Column::IsActive, Expr::value(false))
            .col_expr(curated_sessions::Column::EndedAt, Expr::value(Some(now)))
            .filter(curated_sessions::Column::IsActive.eq(true))
            .exec(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let created = curated_sessions::ActiveModel {
            id: Set(Uuid::new_v4()),
            player_id: Set(player_id.0),
            is_active: Set(true),
            is_confirmed: Set(false),
            created_at: Set(Some(now)),
            ended_at: Set(None),
        }
        .insert(&txn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(created.into())
    }

    async fn find_entries(
        &self,
        session_id: &CuratedSessionId,
    ) -> Result<Vec<CuratedEntry>, DomainError> {
        let results = curated_ratings::Entity::find()
            .filter(curated_ratings::Column::SessionId.eq(session_id.0))
            .order_by_asc(curated_ratings::Column::RaterName)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn upsert_entry(
        &self,
        session_id: &CuratedSessionId,
        entry: &NewCuratedEntry,
    ) -> Result<CuratedEntry, DomainError> {
        let now = Utc::now().fixed_offset();

        let existing = curated_ratings::Entity::find_by_id((session_id.0, entry.rater_name.clone()))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let result = match existing {
            Some(model) => {
                let mut active: curated_ratings::ActiveModel = model.into();
                active.score = Set(entry.score);
                active.note = Set(entry.note.clone());
                active.confirmed = Set(entry.confirmed);
                active.updated_at = Set(Some(now));
                active
                    .update(&self.db)
                    .await
                    .map_err(|e| DomainError::Database(e.to_string()))?
            }
            None => {
                curated_ratings::ActiveModel {
                    session_id: Set(session_id.0),
                    rater_name: Set(entry.rater_name.clone()),
                    score: Set(entry.score),
                    note: Set(entry.note.clone()),
                    confirmed: Set(entry.confirmed),
                    updated_at: Set(Some(now)),
                }
                .insert(&self.db)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?
            }
        };

        Ok(result.into())
    }

    async fn confirm(&self, id: &CuratedSessionId) -> Result<bool, DomainError> {
        let now = Utc::now().fixed_offset();
        let result = curated_sessions::Entity::update_many()
            .col_expr(curated_sessions::Column::IsActive, Expr::value(false))
            .col_expr(curated_sessions::Column::IsConfirmed, Expr::value(true))
            .col_expr(curated_sessions::Column::EndedAt, Expr::value(Some(now)))
            .filter(curated_sessions::Column::Id.eq(id.0))
            .filter(curated_sessions::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn deactivate(&self, id: &CuratedSessionId) -> Result<bool, DomainError> {
        let now = Utc::now().fixed_offset();
        let result = curated_sessions::Entity::update_many()
            .col_expr(curated_sessions::Column::IsActive, Expr::value(false))
            .col_expr(curated_sessions::Column::EndedAt, Expr::value(Some(now)))
            .filter(curated_sessions::Column::Id.eq(id.0))
            .filter(curated_sessions::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// PostgreSQL implementation of CuratedRankingRepository
pub struct PostgresCuratedRankingRepository {
    db: DatabaseConnection,
}

impl PostgresCuratedRankingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CuratedRankingRepository for PostgresCuratedRankingRepository {
    async fn upsert(
        &self,
        player_id: &PlayerId,
        score: i32,
    ) -> Result<CuratedRanking, DomainError> {
        let now = Utc::now().fixed_offset();

        let existing = curated_rankings::Entity::find_by_id(player_id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let result = match existing {
            Some(model) => {
                let mut active: curated_rankings::ActiveModel = model.into();
                active.score = Set(score);
                active.confirmed_at = Set(Some(now));
                active
                    .update(&self.db)
                    .await
                    .map_err(|e| DomainError::Database(e.to_string()))?
            }
            None => {
                curated_rankings::ActiveModel {
                    player_id: Set(player_id.0),
                    score: Set(score),
                    confirmed_at: Set(Some(now)),
                }
                .insert(&self.db)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?
            }
        };

        Ok(result.into())
    }

    async fn list(&self) -> Result<Vec<CuratedRanking>, DomainError> {
        let results = curated_rankings::Entity::find()
            .order_by_desc(curated_rankings::Column::Score)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}
