//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod anomalies;
pub mod curated;
pub mod rankings;
pub mod ratings;
pub mod snapshots;

pub use anomalies::{get_anomalies, skip_anomaly, unskip_anomaly};
pub use curated::{
    confirm_session, create_session, end_session, get_current_session, list_curated_rankings,
    submit_vote,
};
pub use rankings::{get_all_time_ranking, get_ranking};
pub use ratings::submit_ratings;
pub use snapshots::{create_snapshot, get_snapshot, list_snapshots};
