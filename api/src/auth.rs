//! Moderator gate
//!
//! Snapshot creation, anomaly triage and curated-session control are
//! moderator-only. The caller proves it with a shared token in the
//! `X-Moderator-Token` header; full admin authentication is handled by an
//! external layer.

use axum::http::HeaderMap;

use crate::config::Config;
use crate::error::AppError;

pub const MODERATOR_HEADER: &str = "x-moderator-token";

/// Check the moderator header against the configured token.
pub fn require_moderator(headers: &HeaderMap, config: &Config) -> Result<(), AppError> {
    let token = headers
        .get(MODERATOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    if token != config.moderator_token {
        return Err(AppError::Forbidden);
    }
    Ok(())
}
