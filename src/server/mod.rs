//! HTTP server layer for the dua API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      HTTP Layer                         │
//! │   GET /api/categories | /api/subcategories | /api/duas  │
//! │                                                         │
//! │  ┌──────────────────────┐  ┌─────────────────────────┐  │
//! │  │       handlers       │  │         routes          │  │
//! │  │ (requests, errors)   │  │  (router, CORS, trace)  │  │
//! │  └──────────────────────┘  └─────────────────────────┘  │
//! └────────────────────────────┬────────────────────────────┘
//!                              │ one handle per request
//!                              ▼
//!                   ┌─────────────────────┐
//!                   │   store::Database   │
//!                   └─────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    categories_handler, duas_handler, fallback_handler, health_handler, root_handler,
    subcategories_handler, ApiError, AppState, DuasQueryParams, ErrorResponse, HealthResponse,
    MessageResponse, SubcategoriesQueryParams,
};
pub use routes::{create_router, RouterConfig};
