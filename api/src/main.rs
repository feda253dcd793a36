//! SquadRank API Server
//!
//! The rating aggregation and integrity engine for a competitive-club
//! community: eligibility-gated weighted rankings, a deviation guard on the
//! write path, anomaly triage, immutable season snapshots with an all-time
//! merge, and moderator-run curated consensus sessions.
//! Uses hexagonal (ports & adapters) architecture for clean separation of
//! concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod integration_tests;

use adapters::{
    PostgresAnomalySkipRepository, PostgresCuratedRankingRepository,
    PostgresCuratedSessionRepository, PostgresPlayerRepository, PostgresRaterRepository,
    PostgresRatingRepository, PostgresSnapshotRepository,
};
use app::{
    AnomalyService, CuratedSessionService, RankingService, RatingConfig, RatingService,
    SnapshotService,
};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub ranking_service: Arc<
        RankingService<PostgresPlayerRepository, PostgresRaterRepository, PostgresRatingRepository>,
    >,
    pub rating_service: Arc<
        RatingService<PostgresPlayerRepository, PostgresRaterRepository, PostgresRatingRepository>,
    >,
    pub anomaly_service: Arc<
        AnomalyService<
            PostgresPlayerRepository,
            PostgresRaterRepository,
            PostgresRatingRepository,
            PostgresAnomalySkipRepository,
        >,
    >,
    pub snapshot_service: Arc<
        SnapshotService<
            PostgresPlayerRepository,
            PostgresRaterRepository,
            PostgresRatingRepository,
            PostgresSnapshotRepository,
        >,
    >,
    pub curated_service: Arc<
        CuratedSessionService<
            PostgresPlayerRepository,
            PostgresCuratedSessionRepository,
            PostgresCuratedRankingRepository,
        >,
    >,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,squadrank_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SquadRank API...");

    // Load configuration
    let config = Config::from_env();
    let rating_config = RatingConfig::default();

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connected");

    // Create adapters
    let player_repo = Arc::new(PostgresPlayerRepository::new(db.clone()));
    let rater_repo = Arc::new(PostgresRaterRepository::new(db.clone()));
    let rating_repo = Arc::new(PostgresRatingRepository::new(db.clone()));
    let snapshot_repo = Arc::new(PostgresSnapshotRepository::new(db.clone()));
    let session_repo = Arc::new(PostgresCuratedSessionRepository::new(db.clone()));
    let curated_ranking_repo = Arc::new(PostgresCuratedRankingRepository::new(db.clone()));
    let anomaly_skip_repo = Arc::new(PostgresAnomalySkipRepository::new(db.clone()));

    // Create application services
    let ranking_service = Arc::new(
        RankingService::new(player_repo.clone(), rater_repo.clone(), rating_repo.clone())
            .with_config(rating_config.clone()),
    );

    let rating_service = Arc::new(
        RatingService::new(player_repo.clone(), rater_repo.clone(), rating_repo.clone())
            .with_config(rating_config.clone()),
    );

    let anomaly_service = Arc::new(
        AnomalyService::new(
            player_repo.clone(),
            rater_repo.clone(),
            rating_repo.clone(),
            anomaly_skip_repo.clone(),
        )
        .with_config(rating_config.clone()),
    );

    let snapshot_service = Arc::new(
        SnapshotService::new(
            player_repo.clone(),
            rater_repo.clone(),
            rating_repo.clone(),
            snapshot_repo.clone(),
        )
        .with_config(rating_config.clone()),
    );

    let curated_service = Arc::new(
        CuratedSessionService::new(
            player_repo.clone(),
            session_repo.clone(),
            curated_ranking_repo.clone(),
        )
        .with_config(rating_config.clone()),
    );

    // Create app state
    let state = AppState {
        ranking_service,
        rating_service,
        anomaly_service,
        snapshot_service,
        curated_service,
        config: config.clone(),
    };

    // Rate limiting on the write path: 2 req/sec sustained, burst of 5.
    // Uses PeerIpKeyExtractor to get the client IP from the socket
    // connection (SmartIpKeyExtractor would need X-Forwarded-For headers
    // from a reverse proxy).
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("Failed to build governor config"),
    );

    // Rate-limited routes (rating submission, curated votes)
    let rate_limited_routes = Router::new()
        .route("/ratings", post(handlers::submit_ratings))
        .route("/curated/session/votes", post(handlers::submit_vote))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Build router
    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public read endpoints
        .route("/rankings/all-time", get(handlers::get_all_time_ranking))
        .route("/rankings/:category", get(handlers::get_ranking))
        .route("/curated/rankings", get(handlers::list_curated_rankings))
        // Snapshots: list/read are public, creation is moderator-gated
        .route(
            "/snapshots",
            get(handlers::list_snapshots).post(handlers::create_snapshot),
        )
        .route("/snapshots/:name", get(handlers::get_snapshot))
        // Anomaly triage (moderator token checked inside the handlers)
        .route("/anomalies", get(handlers::get_anomalies))
        .route(
            "/anomalies/:rating_id/skip",
            post(handlers::skip_anomaly).delete(handlers::unskip_anomaly),
        )
        // Curated sessions: polling is public, transitions are moderator-gated
        .route(
            "/curated/session",
            get(handlers::get_current_session)
                .post(handlers::create_session)
                .delete(handlers::end_session),
        )
        .route("/curated/session/confirm", post(handlers::confirm_session))
        // Merge rate-limited routes
        .merge(rate_limited_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
