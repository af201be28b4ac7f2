//! Axum extractors for authentication.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::cookie::{TOKEN_COOKIE_NAME, get_cookie};
use super::errors::AuthError;
use super::state::HasAuthState;
use crate::jwt::Claims;

/// Extractor for endpoints that require a valid session.
///
/// Two checkpoints, in order:
/// 1. Presence: no `token` cookie rejects with 401 before any verification.
/// 2. Validity: a cookie that fails signature, structure, or expiry checks
///    rejects with 403.
///
/// On success the decoded claims are handed to the handler. Claims live only
/// for the duration of one request; nothing is stored server-side.
pub struct Auth(pub Claims);

impl<S> FromRequestParts<S> for Auth
where
    S: HasAuthState + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = get_cookie(&parts.headers, TOKEN_COOKIE_NAME)
            .ok_or(AuthError::NotAuthenticated)?;

        let claims = state
            .jwt()
            .verify_token(token)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(Auth(claims))
    }
}
