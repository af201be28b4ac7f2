//! Cookie-based JWT authentication.
//!
//! Sessions are stateless: a single 7-day token carried in an `HttpOnly`
//! cookie, verified per request by the `Auth` extractor. There is no
//! server-side session table and no revocation before expiry.

mod cookie;
mod errors;
mod extractors;
mod state;

pub use cookie::{CookiePolicy, SameSite, TOKEN_COOKIE_NAME, get_cookie};
pub use errors::AuthError;
pub use extractors::Auth;
pub use state::HasAuthState;
