//! HTTP request handlers for the dua read API.
//!
//! # Endpoints
//!
//! - `GET /` - Welcome message
//! - `GET /health` - Health check endpoint
//! - `GET /api/categories` - All categories
//! - `GET /api/subcategories?categoryId=` - Subcategories of one category
//! - `GET /api/duas[?subcategoryId=]` - Duas, optionally of one subcategory

use axum::{
    extract::{FromRequestParts, Query, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::error::DbError;
use crate::store::{Database, Listing, Row};

/// Body of `GET /`.
pub const WELCOME_MESSAGE: &str = "WELCOME TO THE SERVER";

/// Returned when `categoryId` is missing or empty.
pub const CATEGORY_ID_REQUIRED: &str = "Category ID is required";

/// Returned when a category has no subcategories.
pub const NO_SUBCATEGORIES_FOUND: &str = "No subcategories found";

/// Returned for paths that match no route.
pub const ROUTE_NOT_FOUND: &str = "Route not found";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state passed to all handlers via Axum's State extractor.
///
/// Immutable after startup. It carries the store location only; every request
/// opens its own connection.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The backing store
    pub database: Database,
}

impl AppState {
    /// Create a new application state over the given store.
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for the subcategories endpoint.
///
/// Extracted straight from the query string. When `categoryId` is repeated
/// the first value wins.
#[derive(Debug, Default)]
pub struct SubcategoriesQueryParams {
    /// Parent category key, compared exactly as sent
    pub category_id: Option<String>,
}

impl SubcategoriesQueryParams {
    /// The category filter, treating an empty value as absent.
    pub fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SubcategoriesQueryParams {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = query_pairs(parts)?;
        Ok(Self {
            category_id: first_value(pairs, "categoryId"),
        })
    }
}

/// Query parameters for the duas endpoint.
///
/// When `subcategoryId` is repeated the first value wins.
#[derive(Debug, Default)]
pub struct DuasQueryParams {
    /// Parent subcategory key; absent or empty returns every dua
    pub subcategory_id: Option<String>,
}

impl DuasQueryParams {
    /// The subcategory filter, treating an empty value as absent.
    pub fn subcategory_id(&self) -> Option<&str> {
        self.subcategory_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for DuasQueryParams {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = query_pairs(parts)?;
        Ok(Self {
            subcategory_id: first_value(pairs, "subcategoryId"),
        })
    }
}

/// Decode the query string into ordered `key=value` pairs.
///
/// Repeated keys are kept rather than rejected, and a malformed query string
/// becomes a JSON error instead of axum's plain-text rejection.
fn query_pairs(parts: &Parts) -> Result<Vec<(String, String)>, ApiError> {
    Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
        .map(|Query(pairs)| pairs)
        .map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))
}

fn first_value(pairs: Vec<(String, String)>, key: &str) -> Option<String> {
    pairs
        .into_iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value)
}

// =============================================================================
// Response Types
// =============================================================================

/// Plain `{ "message": ... }` body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// JSON error body returned for every error condition.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,

    /// Raw error text, present for data-access faults only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Create an error response carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    /// Create an error response with the underlying error text attached.
    pub fn with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Everything a data handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required query parameter was absent or empty (400)
    #[error("{0}")]
    MissingParameter(&'static str),

    /// The query string could not be decoded (400)
    #[error("{0}")]
    InvalidQuery(String),

    /// The query succeeded but matched nothing where that is an error (404)
    #[error("{0}")]
    NotFound(&'static str),

    /// Connecting to or reading from the store failed (500)
    #[error(transparent)]
    Database(#[from] DbError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert ApiError to HTTP response.
///
/// Data-access faults are logged at ERROR level. Validation and not-found
/// outcomes are expected and only logged at DEBUG level.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::MissingParameter(message) | ApiError::NotFound(message) => {
                debug!(status = status.as_u16(), "Client error: {}", message);
                ErrorResponse::new(*message)
            }
            ApiError::InvalidQuery(message) => {
                debug!(status = status.as_u16(), "Client error: {}", message);
                ErrorResponse::new(message.as_str())
            }
            ApiError::Database(err) => {
                let detail = err.detail();
                error!(
                    status = status.as_u16(),
                    error = %detail,
                    "Server error: {}",
                    err
                );
                ErrorResponse::with_error(err.to_string(), detail)
            }
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle requests to the root path.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// ```json
/// { "message": "WELCOME TO THE SERVER" }
/// ```
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// Handle health check requests.
///
/// Does not touch the store.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle category list requests.
///
/// # Endpoint
///
/// `GET /api/categories`
///
/// # Response
///
/// - `200 OK`: JSON array of every `category` row (possibly empty)
/// - `500 Internal Server Error`: `{ "message", "error" }`
pub async fn categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = state
        .database
        .run(|handle| handle.fetch(Listing::Categories))
        .await?;

    Ok(Json(rows))
}

/// Handle subcategory list requests.
///
/// The handle is acquired before `categoryId` is checked, so a missing store
/// is reported as a fault even when the parameter is also missing.
///
/// # Endpoint
///
/// `GET /api/subcategories?categoryId={id}`
///
/// # Response
///
/// - `200 OK`: JSON array of matching `sub_category` rows
/// - `400 Bad Request`: `categoryId` missing or empty
/// - `404 Not Found`: no subcategory has that `cat_id`
/// - `500 Internal Server Error`: `{ "message", "error" }`
pub async fn subcategories_handler(
    State(state): State<AppState>,
    params: SubcategoriesQueryParams,
) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = state
        .database
        .run(move |handle| -> Result<Vec<Row>, ApiError> {
            let category_id = params
                .category_id()
                .ok_or(ApiError::MissingParameter(CATEGORY_ID_REQUIRED))?;

            let rows = handle.fetch(Listing::Subcategories { category_id })?;
            if rows.is_empty() {
                return Err(ApiError::NotFound(NO_SUBCATEGORIES_FOUND));
            }

            Ok(rows)
        })
        .await?;

    Ok(Json(rows))
}

/// Handle dua list requests.
///
/// Unlike subcategories, an empty result is a normal `200` with `[]`.
///
/// # Endpoint
///
/// `GET /api/duas` or `GET /api/duas?subcategoryId={id}`
///
/// # Response
///
/// - `200 OK`: JSON array of `dua` rows (possibly empty)
/// - `500 Internal Server Error`: `{ "message", "error" }`
pub async fn duas_handler(
    State(state): State<AppState>,
    params: DuasQueryParams,
) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = state
        .database
        .run(move |handle| {
            handle.fetch(Listing::Duas {
                subcategory_id: params.subcategory_id(),
            })
        })
        .await?;

    Ok(Json(rows))
}

/// Fallback for unmatched paths.
pub async fn fallback_handler() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(ROUTE_NOT_FOUND)))
}

// =============================================================================
// Tests
// =============================================================================
