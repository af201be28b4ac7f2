pub mod api;
pub mod auth;
pub mod cli;
pub mod db;
pub mod jwt;

use api::create_api_router;
use auth::CookiePolicy;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    response::IntoResponse,
    routing::get,
};
use db::Database;
use jwt::JwtConfig;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub struct ServerConfig {
    /// Database connection (cloneable, uses connection pool internally)
    pub db: Database,
    /// JWT secret for signing tokens
    pub jwt_secret: Vec<u8>,
    /// Session cookie attributes (production vs development)
    pub cookie_policy: CookiePolicy,
    /// Front-end origin allowed for cross-site requests, if any.
    /// Required in production: the session cookie is sent cross-site
    /// (SameSite=None), which browsers only permit when the response also
    /// carries matching Access-Control-Allow-Origin/Allow-Credentials.
    pub cors_origin: Option<HeaderValue>,
}

/// Create the application router with the given configuration.
pub fn create_app(config: &ServerConfig) -> Router {
    let jwt = Arc::new(JwtConfig::new(&config.jwt_secret));

    let router = Router::new()
        .route("/", get(index))
        .merge(create_api_router(
            config.db.clone(),
            jwt,
            config.cookie_policy,
        ));

    match &config.cors_origin {
        Some(origin) => router.layer(cors_layer(origin.clone())),
        None => router,
    }
}

/// CORS layer for a credentialed cross-site front end. The origin must be
/// exact - wildcards are not valid together with Allow-Credentials.
fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn index() -> impl IntoResponse {
    "API is running..."
}

/// Run the server on the given listener. This function blocks until the server exits.
pub async fn run_server(config: ServerConfig, listener: TcpListener) -> Result<(), std::io::Error> {
    let app = create_app(&config);
    axum::serve(listener, app).await
}
