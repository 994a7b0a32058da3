use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Middleware that enforces a valid `Authorization: Bearer <jwt>` header.
///
/// The token is verified against the signing key in [`AppState`]; on
/// success the authenticated [`crate::auth::AuthUser`] is inserted as a
/// request extension for handlers that want to know who is acting.
/// Missing, malformed or expired tokens are rejected with 401 before any
/// handler (and thus any store mutation) runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(value) if value.starts_with("Bearer ") => &value[7..],
        _ => return Err(AppError::Unauthorized("Missing bearer token".to_string())),
    };

    let user = state.tokens.verify(token)?;
    tracing::debug!(user = %user.username, "authenticated request");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
