//! Session cookie parsing and construction.

use axum::http::header;

/// Cookie name for the session token.
pub const TOKEN_COOKIE_NAME: &str = "token";

/// Extract a cookie value from the Cookie header.
pub fn get_cookie<'a>(headers: &'a axum::http::HeaderMap, name: &str) -> Option<&'a str> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in cookie_header.split(';') {
        let part = part.trim();
        if let Some((key, value)) = part.split_once('=') {
            if key.trim() == name {
                return Some(value.trim());
            }
        }
    }
    None
}

/// SameSite attribute for the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Security attributes for the session cookie, fixed at startup.
///
/// Production deployments serve a separately hosted front end over HTTPS, so
/// the cookie must be `Secure` with `SameSite=None`. Local development lacks
/// HTTPS, so it gets `SameSite=Strict` without `Secure`.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookiePolicy {
    /// Policy for production deployments (HTTPS, cross-site front end).
    pub fn production() -> Self {
        Self {
            secure: true,
            same_site: SameSite::None,
        }
    }

    /// Policy for local development (plain HTTP, same-site only).
    pub fn development() -> Self {
        Self {
            secure: false,
            same_site: SameSite::Strict,
        }
    }

    /// Build the Set-Cookie value carrying a session token.
    pub fn session_cookie(&self, token: &str, max_age: u64) -> String {
        format!(
            "{}={}; HttpOnly; SameSite={}; Path=/; Max-Age={}{}",
            TOKEN_COOKIE_NAME,
            token,
            self.same_site.as_str(),
            max_age,
            self.secure_suffix()
        )
    }

    /// Build the Set-Cookie value that removes the session cookie.
    /// Uses the identical attribute set as `session_cookie` - a mismatch
    /// silently fails to clear the cookie in most implementations.
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; HttpOnly; SameSite={}; Path=/; Max-Age=0{}",
            TOKEN_COOKIE_NAME,
            self.same_site.as_str(),
            self.secure_suffix()
        )
    }

    fn secure_suffix(&self) -> &'static str {
        if self.secure { "; Secure" } else { "" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_get_cookie_simple() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token=abc123"));

        assert_eq!(get_cookie(&headers, "token"), Some("abc123"));
    }

    #[test]
    fn test_get_cookie_multiple() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; token=abc123; theme=dark"),
        );

        assert_eq!(get_cookie(&headers, "token"), Some("abc123"));
        assert_eq!(get_cookie(&headers, "foo"), Some("bar"));
        assert_eq!(get_cookie(&headers, "theme"), Some("dark"));
    }

    #[test]
    fn test_get_cookie_not_found() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("foo=bar"));

        assert_eq!(get_cookie(&headers, "token"), None);
    }

    #[test]
    fn test_get_cookie_no_header() {
        let headers = axum::http::HeaderMap::new();
        assert_eq!(get_cookie(&headers, "token"), None);
    }

    #[test]
    fn test_get_cookie_with_spaces() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("  token = abc123  ; foo=bar"),
        );

        assert_eq!(get_cookie(&headers, "token"), Some("abc123"));
    }

    #[test]
    fn test_development_session_cookie() {
        let policy = CookiePolicy::development();
        let cookie = policy.session_cookie("tok", 3600);

        assert_eq!(
            cookie,
            "token=tok; HttpOnly; SameSite=Strict; Path=/; Max-Age=3600"
        );
    }

    #[test]
    fn test_production_session_cookie() {
        let policy = CookiePolicy::production();
        let cookie = policy.session_cookie("tok", 3600);

        assert_eq!(
            cookie,
            "token=tok; HttpOnly; SameSite=None; Path=/; Max-Age=3600; Secure"
        );
    }

    #[test]
    fn test_clear_cookie_matches_session_attributes() {
        // The clearing cookie must carry the same attribute set as the
        // session cookie, differing only in value and Max-Age.
        for policy in [CookiePolicy::development(), CookiePolicy::production()] {
            let session = policy.session_cookie("tok", 60);
            let clear = policy.clear_cookie();

            let session_attrs = session.replace("token=tok", "").replace("Max-Age=60", "");
            let clear_attrs = clear.replace("token=", "").replace("Max-Age=0", "");
            assert_eq!(session_attrs, clear_attrs);
            assert!(clear.contains("Max-Age=0"));
        }
    }
}
