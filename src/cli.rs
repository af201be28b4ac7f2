//! CLI argument parsing, validation, and startup helpers.

use crate::ServerConfig;
use crate::auth::CookiePolicy;
use crate::db::Database;
use axum::http::HeaderValue;
use clap::Parser;
use tracing::{error, info};

const MIN_JWT_SECRET_LENGTH: usize = 32;

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "LoanLink", about = "Loan tracking backend with cookie-based JWT sessions")]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5000", env = "PORT")]
    pub port: u16,

    /// Path to SQLite database file
    #[arg(short, long, default_value = "loanlink.db")]
    pub database: String,

    /// Path to file containing JWT secret. Prefer using JWT_SECRET env var instead
    #[arg(long)]
    pub jwt_secret_file: Option<String>,

    /// Production deployment: Secure cross-site session cookies (requires HTTPS)
    #[arg(long, env = "PRODUCTION")]
    pub production: bool,

    /// Front-end origin allowed for cross-site requests (e.g. "https://app.example.com")
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Log output format
    #[arg(short, long, default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Initialize logging based on the specified format.
pub fn init_logging(format: &LogFormat) {
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt::init(),
        LogFormat::Json => tracing_subscriber::fmt().json().init(),
        LogFormat::Compact => tracing_subscriber::fmt().compact().init(),
    }
}

/// Load JWT secret from environment variable or file.
/// Returns None and logs an error if the secret cannot be loaded.
pub fn load_jwt_secret(jwt_secret_file: Option<&str>) -> Option<String> {
    let secret = if let Ok(secret) = std::env::var("JWT_SECRET") {
        // Clear the environment variable to prevent leaking
        // SAFETY: We're single-threaded at this point during startup,
        // and no other code is reading this environment variable.
        unsafe { std::env::remove_var("JWT_SECRET") };
        secret
    } else if let Some(path) = jwt_secret_file {
        match std::fs::read_to_string(path) {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                error!(path = %path, error = %e, "Failed to read JWT secret file");
                return None;
            }
        }
    } else {
        error!(
            "JWT secret is required. Set JWT_SECRET environment variable (recommended) or use --jwt-secret-file"
        );
        return None;
    };

    if secret.len() < MIN_JWT_SECRET_LENGTH {
        error!(
            "JWT secret is shorter than {} characters. Use a longer secret",
            MIN_JWT_SECRET_LENGTH
        );
        return None;
    }

    Some(secret)
}

/// Parse and validate the CORS origin argument (absent is allowed: no
/// cross-site layer is installed then).
/// Returns None and logs an error if the value is not a valid header value.
pub fn validate_cors_origin(origin: Option<&str>) -> Option<Option<HeaderValue>> {
    match origin {
        None => Some(None),
        Some(o) => match HeaderValue::from_str(o) {
            Ok(value) => Some(Some(value)),
            Err(e) => {
                error!(origin = %o, error = %e, "Invalid CORS origin");
                None
            }
        },
    }
}

/// Build ServerConfig from validated arguments.
pub fn build_config(
    db: Database,
    jwt_secret: String,
    production: bool,
    cors_origin: Option<HeaderValue>,
) -> ServerConfig {
    let cookie_policy = if production {
        CookiePolicy::production()
    } else {
        CookiePolicy::development()
    };

    ServerConfig {
        db,
        jwt_secret: jwt_secret.into_bytes(),
        cookie_policy,
        cors_origin,
    }
}

/// Open the database, logging errors if it fails.
pub async fn open_database(path: &str) -> Option<Database> {
    match Database::open(path).await {
        Ok(db) => {
            info!(path = %path, "Database opened");
            Some(db)
        }
        Err(e) => {
            error!(path = %path, error = %e, "Failed to open database");
            None
        }
    }
}
