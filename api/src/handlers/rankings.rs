//! Ranking read handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::app::{AllTimeEntry, RankedPlayer};
use crate::domain::entities::Category;
use crate::error::AppError;
use crate::AppState;

/// GET /rankings/:category
///
/// The live leaderboard for one category.
pub async fn get_ranking(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<RankedPlayer>>, AppError> {
    let category: Category = category.parse().map_err(AppError::BadRequest)?;
    let ranking = state.ranking_service.get_ranking(category).await?;
    Ok(Json(ranking))
}

/// Query parameters for the all-time view
#[derive(Debug, Deserialize)]
pub struct AllTimeQuery {
    pub category: Option<String>,
}

/// GET /rankings/all-time
///
/// The lifetime ranking merged across snapshot periods; legends always
/// show their live aggregate.
pub async fn get_all_time_ranking(
    State(state): State<AppState>,
    Query(query): Query<AllTimeQuery>,
) -> Result<Json<Vec<AllTimeEntry>>, AppError> {
    let category = match query.category {
        Some(raw) => Some(raw.parse::<Category>().map_err(AppError::BadRequest)?),
        None => None,
    };
    let ranking = state.snapshot_service.all_time_ranking(category).await?;
    Ok(Json(ranking))
}
