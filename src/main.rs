//! Dua API - A read-only JSON API over a SQLite store of duas.
//!
//! This binary loads configuration, initializes logging and starts the HTTP
//! server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dua_api::{
    config::Config,
    server::{create_router, RouterConfig},
    store::Database,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Values from .env never override variables already set in the environment
    let dotenv = dotenvy::dotenv();

    let config = Config::parse();

    init_logging(config.verbose);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let database = Database::new(&config.database);

    info!("Configuration:");
    info!("  Database: {}", database.path().display());
    if !database.exists() {
        warn!("  Database file not found; data requests will fail until it exists");
    }

    match &config.cors_origins {
        None => info!("  CORS: any origin"),
        Some(origins) if origins.is_empty() => warn!("  CORS: cross-origin requests disabled"),
        Some(origins) => info!(
            "  CORS: {} (credentials {})",
            origins.join(", "),
            if config.cors_credentials {
                "allowed"
            } else {
                "not allowed"
            }
        ),
    }

    let router = create_router(database, build_router_config(&config));

    let addr = config.bind_address();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server running on http://{}", addr);
    info!("  curl http://{}/api/categories", addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "dua_api=debug,tower_http=debug"
    } else {
        "dua_api=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new().with_cors_credentials(config.cors_credentials);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}
