//! Unified error types for the SquadRank API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::entities::PlayerId;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// One deviation-guard violation, reported per player so the rater sees
/// every failing entry of a batch at once.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreViolation {
    pub player_id: PlayerId,
    pub message: String,
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// The deviation guard rejected the whole batch. Carries one message
    /// per failing player; nothing was committed.
    #[error("Rating batch rejected: {} violation(s)", .0.len())]
    RatingRejected(Vec<ScoreViolation>),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    /// Per-player messages for rejected rating batches
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, errors) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()), None)
            }
            AppError::Domain(DomainError::AlreadyExists(msg)) => (
                StatusCode::CONFLICT,
                "Already exists",
                Some(msg.clone()),
                None,
            ),
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
                None,
            ),
            AppError::Domain(DomainError::Unauthorized(msg)) => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                Some(msg.clone()),
                None,
            ),
            AppError::Domain(DomainError::Forbidden(msg)) => (
                StatusCode::FORBIDDEN,
                "Forbidden",
                Some(msg.clone()),
                None,
            ),
            AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "Conflict", Some(msg.clone()), None)
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                )
            }
            AppError::RatingRejected(violations) => {
                let map: BTreeMap<String, String> = violations
                    .iter()
                    .map(|v| (v.player_id.to_string(), v.message.clone()))
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Rating batch rejected",
                    None,
                    Some(map),
                )
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad request",
                Some(msg.clone()),
                None,
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None, None),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden", None, None),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()), None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
            errors,
        });

        (status, body).into_response()
    }
}
