//! Router configuration for the dua API.
//!
//! This module defines the HTTP routes and applies middleware for CORS and
//! request tracing.
//!
//! # Route Structure
//!
//! ```text
//! /                    - Welcome message
//! /health              - Health check
//! /api/categories      - All categories
//! /api/subcategories   - Subcategories of a category (?categoryId=)
//! /api/duas            - Duas, optionally of a subcategory (?subcategoryId=)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dua_api::server::{create_router, RouterConfig};
//! use dua_api::store::Database;
//!
//! # async fn demo() -> std::io::Result<()> {
//! let config = RouterConfig::new()
//!     .with_cors_origins(vec!["https://example.com".to_string()])
//!     .with_cors_credentials(true);
//!
//! let router = create_router(Database::new("dua_main.sqlite"), config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use axum::{routing::get, Router};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::handlers::{
    categories_handler, duas_handler, fallback_handler, health_handler, root_handler,
    subcategories_handler, AppState,
};
use crate::store::Database;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether cross-origin requests may carry credentials.
    ///
    /// Only honored with an explicit origin list.
    pub cors_credentials: bool,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration.
    ///
    /// By default:
    /// - CORS allows any origin, without credentials
    /// - Tracing is enabled
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            cors_credentials: false,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Allow or forbid credentialed cross-origin requests.
    pub fn with_cors_credentials(mut self, enabled: bool) -> Self {
        self.cors_credentials = enabled;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `database` - The store every data route reads from
/// * `config` - Router configuration
pub fn create_router(database: Database, config: RouterConfig) -> Router {
    let app_state = AppState::new(database);

    let api_routes = Router::new()
        .route("/categories", get(categories_handler))
        .route("/subcategories", get(subcategories_handler))
        .route("/duas", get(duas_handler));

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_routes)
        .fallback(fallback_handler)
        .with_state(app_state)
        .layer(build_cors_layer(&config));

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
///
/// A `*` entry in the origin list is treated as "any origin".
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    match &config.cors_origins {
        Some(origins) if origins.iter().any(|o| o == "*") => any_origin(cors, config),
        None => any_origin(cors, config),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
                .allow_credentials(config.cors_credentials)
        }
    }
}

fn any_origin(cors: CorsLayer, config: &RouterConfig) -> CorsLayer {
    if config.cors_credentials {
        warn!("CORS credentials ignored: not allowed together with any origin");
    }
    cors.allow_origin(Any)
}

// =============================================================================
// Tests
// =============================================================================
