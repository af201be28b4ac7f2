//! Authentication error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Authentication failures, distinguished by whether a credential was
/// presented at all. Callers must be able to tell "never logged in" (401)
/// apart from "credential is stale or tampered" (403).
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No session cookie was presented.
    NotAuthenticated,
    /// A session cookie was presented but failed verification
    /// (bad signature, malformed, or expired).
    InvalidToken,
}

impl AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::FORBIDDEN,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AuthError::NotAuthenticated => "Not authenticated",
            AuthError::InvalidToken => "Invalid or expired token",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        use serde::Serialize;

        #[derive(Serialize)]
        struct ErrorResponse {
            error: &'static str,
        }

        (
            self.status_code(),
            Json(ErrorResponse {
                error: self.message(),
            }),
        )
            .into_response()
    }
}
