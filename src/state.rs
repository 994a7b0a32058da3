use std::sync::Arc;

use crate::auth::TokenSigner;
use crate::config::AppConfig;
use crate::metrics::Metrics;

/// The shared application state.
///
/// Holds the process-wide resources handed to every handler via Axum's
/// `State` extractor: the database pool, the parsed configuration, the
/// token signer and the usage counters. Constructed once at startup;
/// nothing reaches for globals.
#[derive(Clone)]
pub struct AppState {
    /// The SQLite connection pool.
    pub db: sqlx::SqlitePool,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Signs and verifies bearer tokens.
    pub tokens: TokenSigner,
    /// Usage counters exposed at /metrics.
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        let tokens = TokenSigner::new(&config.auth.jwt_secret, config.auth.token_ttl_minutes);
        Self { db, config: Arc::new(config), tokens, metrics: Metrics::new() }
    }
}
