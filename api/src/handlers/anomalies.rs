//! Anomaly triage handlers
//!
//! All moderator-gated: the scan walks the whole store and the skip list
//! changes what future scans report.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::app::AnomalyReport;
use crate::auth::require_moderator;
use crate::domain::entities::RatingId;
use crate::error::AppError;
use crate::AppState;

/// GET /anomalies
///
/// Run the full scan and return flags for human triage: boost flags first,
/// then deviation flags by descending magnitude.
pub async fn get_anomalies(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AnomalyReport>, AppError> {
    require_moderator(&headers, &state.config)?;
    let report = state.anomaly_service.scan().await?;
    Ok(Json(report))
}

/// Response body for skip-list mutations
#[derive(Debug, Serialize)]
pub struct SkipResponse {
    pub rating_id: Uuid,
    pub skipped: bool,
}

/// POST /anomalies/:rating_id/skip
///
/// Mark a flagged rating as reviewed-not-a-problem.
pub async fn skip_anomaly(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(rating_id): Path<Uuid>,
) -> Result<Json<SkipResponse>, AppError> {
    require_moderator(&headers, &state.config)?;
    state.anomaly_service.skip(&RatingId(rating_id)).await?;
    Ok(Json(SkipResponse {
        rating_id,
        skipped: true,
    }))
}

/// DELETE /anomalies/:rating_id/skip
///
/// Let a previously dismissed rating be flagged again. Removing an absent
/// entry succeeds.
pub async fn unskip_anomaly(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(rating_id): Path<Uuid>,
) -> Result<Json<SkipResponse>, AppError> {
    require_moderator(&headers, &state.config)?;
    state.anomaly_service.unskip(&RatingId(rating_id)).await?;
    Ok(Json(SkipResponse {
        rating_id,
        skipped: false,
    }))
}
