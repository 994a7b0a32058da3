//! HTTP route handlers for the MediaShelf API.
//!
//! - `auth`: registration and login, issuing bearer tokens
//! - `files`: the catalog CRUD plus the reorder endpoint
//! - `health`: health check, readiness, metrics and version endpoints

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub mod auth;
pub mod files;
pub mod health;

/// Assembles the full API router. Mutating file endpoints sit behind the
/// bearer-token guard; listing, health and the auth endpoints are public.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/version", get(health::version))
        .route("/api/files", get(files::list_files))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/api/files", post(files::create_file))
        .route("/api/files/reorder", post(files::reorder_file))
        .route("/api/files/{id}", put(files::update_file).delete(files::delete_file))
        .route_layer(from_fn_with_state(state.clone(), crate::middleware::auth::require_auth));

    public.merge(protected).with_state(state)
}
