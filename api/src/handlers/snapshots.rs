//! Snapshot handlers

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::require_moderator;
use crate::domain::entities::{HistoricalRating, SnapshotPeriod};
use crate::error::AppError;
use crate::AppState;

/// Request body for creating a snapshot
#[derive(Debug, Deserialize)]
pub struct CreateSnapshotRequest {
    pub name: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Response body for a created snapshot
#[derive(Debug, Serialize)]
pub struct CreateSnapshotResponse {
    pub period: SnapshotPeriod,
    pub rows: usize,
}

/// POST /snapshots
///
/// Freeze the current ranking under a unique period name. Duplicate names
/// are rejected; nothing is ever overwritten.
pub async fn create_snapshot(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateSnapshotRequest>,
) -> Result<(StatusCode, Json<CreateSnapshotResponse>), AppError> {
    require_moderator(&headers, &state.config)?;
    let (period, rows) = state
        .snapshot_service
        .create_snapshot(&request.name, request.starts_at, request.ends_at)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateSnapshotResponse { period, rows }),
    ))
}

/// GET /snapshots
pub async fn list_snapshots(
    State(state): State<AppState>,
) -> Result<Json<Vec<SnapshotPeriod>>, AppError> {
    Ok(Json(state.snapshot_service.list_periods().await?))
}

/// Response body for one period's frozen rows
#[derive(Debug, Serialize)]
pub struct SnapshotDetailResponse {
    pub period: SnapshotPeriod,
    pub rows: Vec<HistoricalRating>,
}

/// GET /snapshots/:name
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SnapshotDetailResponse>, AppError> {
    let (period, rows) = state.snapshot_service.period_rows(&name).await?;
    Ok(Json(SnapshotDetailResponse { period, rows }))
}
