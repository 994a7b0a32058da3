use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use sqlx::Row;
use uuid::Uuid;

use crate::{
    auth::{self, AuthError},
    error::{validation, AppError, AppResult},
    state::AppState,
    types::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse},
};

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    validation::validate_username(&req.username)?;
    validation::validate_password(&req.password, state.config.auth.min_password_length)?;

    let existing = sqlx::query("SELECT id FROM users WHERE username = ?1")
        .bind(&req.username)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    let password_hash = auth::hash_password(&req.password)?;
    let id = Uuid::new_v4();
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let insert = sqlx::query(
        "INSERT INTO users (id, username, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(id.to_string())
    .bind(&req.username)
    .bind(&password_hash)
    .bind(&created_at)
    .execute(&state.db)
    .await;

    if let Err(e) = insert {
        // Two concurrent registrations can pass the pre-check; the unique
        // index on username catches the loser.
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.message().to_lowercase().contains("unique") {
                return Err(AppError::Conflict("Username already taken".to_string()));
            }
        }
        return Err(e.into());
    }

    tracing::info!(username = %req.username, "registered user");
    Ok((StatusCode::CREATED, Json(MessageResponse::new("User registered"))))
}

/// POST /api/auth/login
///
/// Unknown username and wrong password produce the same 401 so the
/// endpoint cannot be used to enumerate users.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let row = sqlx::query("SELECT id, password_hash FROM users WHERE username = ?1")
        .bind(&req.username)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let password_hash: String = row.get("password_hash");
    if !auth::verify_password(&req.password, &password_hash)? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let user_id = Uuid::parse_str(row.get::<String, _>("id").as_str())
        .map_err(|e| AppError::Database(format!("Corrupt user id: {}", e)))?;
    let token = state.tokens.issue(user_id, &req.username)?;

    state.metrics.inc_logins();
    tracing::info!(username = %req.username, "login succeeded");
    Ok(Json(TokenResponse { token, expires_in: state.tokens.ttl_seconds() }))
}
