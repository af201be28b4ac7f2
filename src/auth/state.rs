//! State traits for authentication extractors.

use crate::jwt::JwtConfig;

/// Router state that can verify session tokens.
/// Implemented by any handler state carrying the JWT configuration, so the
/// `Auth` extractor works across resource routers.
pub trait HasAuthState {
    fn jwt(&self) -> &JwtConfig;
}
