//! User API endpoints.
//!
//! - GET `/` - List all users (requires a valid session)
//! - POST `/` - Create a user (public)
//! - GET `/role` - Look up the role for an email (public, borrower default)

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::{ApiError, ResultExt};
use crate::auth::{Auth, HasAuthState};
use crate::db::{Database, Role};
use crate::jwt::JwtConfig;

#[derive(Clone)]
pub struct UsersState {
    pub db: Database,
    pub jwt: Arc<JwtConfig>,
}

impl HasAuthState for UsersState {
    fn jwt(&self) -> &JwtConfig {
        &self.jwt
    }
}

pub fn router(state: UsersState) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/role", get(get_role))
        .with_state(state)
}

#[derive(Deserialize)]
struct CreateUserRequest {
    email: Option<String>,
    name: Option<String>,
    role: Option<Role>,
}

/// Create a user. The email is the unique key; a duplicate is a conflict.
async fn create_user(
    State(state): State<UsersState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email is required"))?;

    let role = payload.role.unwrap_or_default();

    let exists = state
        .db
        .users()
        .email_exists(email)
        .await
        .db_err("Failed to check email")?;

    if exists {
        return Err(ApiError::conflict("Email is already registered"));
    }

    state
        .db
        .users()
        .create(email, payload.name.as_deref(), role)
        .await
        .db_err("Failed to create user")?;

    let user = state
        .db
        .users()
        .get_by_email(email)
        .await
        .db_err("Failed to get user")?
        .ok_or_else(|| ApiError::internal("User not found after creation"))?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users. Requires some valid session; no role is enforced beyond
/// that.
async fn list_users(
    State(state): State<UsersState>,
    Auth(_claims): Auth,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.db.users().list().await.db_err("Failed to list users")?;

    Ok(Json(users))
}

#[derive(Deserialize)]
struct RoleQuery {
    email: Option<String>,
}

#[derive(Serialize)]
struct RoleResponse {
    role: Role,
}

/// Look up the role for an email. Unknown emails default to borrower.
async fn get_role(
    State(state): State<UsersState>,
    Query(query): Query<RoleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let email = query
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

    Ok(Json(RoleResponse { role }))
}
