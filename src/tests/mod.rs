//! Test support and test modules.
//!
//! All tests run against an in-memory SQLite pool with the real schema, so
//! the SQL paths are exercised exactly as in production.

mod auth_tests;
mod error_tests;

use sqlx::sqlite::SqlitePoolOptions;

use crate::config::{AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig};
use crate::state::AppState;

pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig { host: "127.0.0.1".to_string(), port: 8080 },
        database: DatabaseConfig { url: "sqlite::memory:".to_string() },
        auth: AuthConfig {
            jwt_secret: "test_secret_key_for_testing_only".to_string(),
            token_ttl_minutes: 60,
            min_password_length: 8,
        },
        cors: Some(CorsConfig { allowed_origin: None }),
    }
}

pub(crate) async fn mk_state() -> AppState {
    // A single connection, otherwise every pool checkout would see a fresh
    // empty in-memory database.
    let pool =
        SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await.unwrap();
    crate::db::init_db(&pool).await.unwrap();
    AppState::new(pool, test_config())
}
