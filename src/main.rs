use clap::Parser;
use loanlink::cli::{
    Args, build_config, init_logging, load_jwt_secret, open_database, validate_cors_origin,
};
use loanlink::run_server;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(&args.log_format);

    let Some(jwt_secret) = load_jwt_secret(args.jwt_secret_file.as_deref()) else {
        std::process::exit(1);
    };

    // A database that cannot be opened is fatal before the server starts
    // accepting traffic.
    let Some(db) = open_database(&args.database).await else {
        std::process::exit(1);
    };

    let Some(cors_origin) = validate_cors_origin(args.cors_origin.as_deref()) else {
        std::process::exit(1);
    };

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            error!(address = %addr, error = %e, "Failed to bind");
            std::process::exit(1);
        });

    let local_addr = listener.local_addr().unwrap();

    let config = build_config(db, jwt_secret, args.production, cors_origin);

    info!(address = %local_addr, "Listening");

    if let Err(e) = run_server(config, listener).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
