mod error;
mod loans;
mod session;
mod users;

use axum::Router;
use std::sync::Arc;

use crate::auth::CookiePolicy;
use crate::db::Database;
use crate::jwt::JwtConfig;

/// Create the API router.
pub fn create_api_router(db: Database, jwt: Arc<JwtConfig>, cookie_policy: CookiePolicy) -> Router {
    let session_state = session::SessionState {
        db: db.clone(),
        jwt: jwt.clone(),
        cookie_policy,
    };

    let users_state = users::UsersState {
        db: db.clone(),
        jwt,
    };

    let loans_state = loans::LoansState { db };

    Router::new()
        .merge(session::router(session_state))
        .nest("/users", users::router(users_state))
        .nest("/loans", loans::router(loans_state))
}
