//! # Dua API
//!
//! A read-only JSON API over a SQLite store of dua categories, subcategories
//! and entries.
//!
//! Every data request opens its own read-only connection, runs one fixed
//! statement, serializes the rows and closes the connection again. There is
//! no write path, no caching and no connection pool.
//!
//! ## Architecture
//!
//! - [`store`] - Per-request SQLite handles, the fixed listings, row → JSON
//! - [`server`] - Axum handlers, error mapping and router with CORS
//! - [`config`] - CLI and environment configuration
//! - [`error`] - Store error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use dua_api::{create_router, Database, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = create_router(Database::new("dua_main.sqlite"), RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::DbError;
pub use server::{
    categories_handler, create_router, duas_handler, fallback_handler, health_handler,
    root_handler, subcategories_handler, ApiError, AppState, DuasQueryParams, ErrorResponse,
    HealthResponse, MessageResponse, RouterConfig, SubcategoriesQueryParams,
};
pub use store::{value_to_json, Database, Handle, Listing, Row, DEFAULT_DATABASE_PATH};
