//! Session API endpoints.
//!
//! - POST `/jwt` - Resolve a role for an email and issue a session cookie
//! - POST `/logout` - Clear the session cookie
//!
//! The server is stateless with respect to sessions: issuing overwrites the
//! client's previous cookie, logout clears it, and nothing is tracked
//! server-side.

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use super::error::{ApiError, ResultExt};
use crate::auth::CookiePolicy;
use crate::db::{Database, Role};
use crate::jwt::JwtConfig;

#[derive(Clone)]
pub struct SessionState {
    pub db: Database,
    pub jwt: Arc<JwtConfig>,
    pub cookie_policy: CookiePolicy,
}

pub fn router(state: SessionState) -> Router {
    Router::new()
        .route("/jwt", post(login))
        .route("/logout", post(logout))
        .with_state(state)
}

#[derive(Deserialize)]
struct LoginRequest {
    email: Option<String>,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
    role: Role,
}

/// Issue a session token for the given email.
///
/// The role comes from the credential store at issuance time; an unknown
/// email (or a record without a role) still gets a valid borrower session,
/// so unregistered users are not blocked from read-only borrower flows.
async fn login(
    State(state): State<SessionState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email is required"))?;

    let role = state
        .db
        .users()
        .get_by_email(email)
        .await
        .db_err("Failed to look up user")?
        .map(|user| user.role)
        .unwrap_or_default();

    let issued = state.jwt.issue_token(email, role).map_err(|e| {
        error!("Failed to issue token: {}", e);
        ApiError::internal("Failed to issue token")
    })?;

    let cookie = state
        .cookie_policy
        .session_cookie(&issued.token, issued.duration);

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            role,
        }),
    ))
}

/// Logout - clear the session cookie.
/// The clearing cookie carries the same attributes the session cookie was
/// set with; nothing is revoked server-side.
async fn logout(State(state): State<SessionState>) -> impl IntoResponse {
    let cookie = state.cookie_policy.clear_cookie();

    (
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(serde_json::json!({ "success": true })),
    )
}
