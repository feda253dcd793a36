use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Shared token for moderator operations (snapshots, anomaly triage,
    /// curated session control). Real admin auth lives outside this service.
    pub moderator_token: String,
    /// Suggested client poll interval for the curated session view, seconds.
    pub curated_poll_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            moderator_token: env::var("MODERATOR_TOKEN")
                .unwrap_or_else(|_| "dev-moderator-not-for-production".to_string()),
            curated_poll_secs: env::var("CURATED_POLL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
        }
    }
}
