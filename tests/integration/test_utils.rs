//! Test utilities for integration tests.
//!
//! Stores are real SQLite files written into a temporary directory that lives
//! as long as the [`TestStore`].

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use rusqlite::Connection;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use dua_api::{create_router, Database, RouterConfig};

// =============================================================================
// Fixture Stores
// =============================================================================

/// Schema matching the production store.
pub const SCHEMA: &str = "
    CREATE TABLE category (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );
    CREATE TABLE sub_category (
        id INTEGER PRIMARY KEY,
        cat_id INTEGER NOT NULL,
        name TEXT NOT NULL
    );
    CREATE TABLE dua (
        id INTEGER PRIMARY KEY,
        subcat_id INTEGER NOT NULL,
        text TEXT NOT NULL,
        reference TEXT
    );
";

/// Two categories, two subcategories, three duas.
pub const SEED: &str = "
    INSERT INTO category (id, name) VALUES (1, 'Morning'), (2, 'Evening');
    INSERT INTO sub_category (id, cat_id, name) VALUES (10, 1, 'Waking Up'), (20, 2, 'Before Sleep');
    INSERT INTO dua (id, subcat_id, text, reference) VALUES
        (100, 10, 'All praise is for Allah who gave us life', 'Bukhari 6312'),
        (200, 20, 'In Your name, O Allah, I die and I live', NULL),
        (201, 20, 'O Allah, protect me from Your punishment', 'Abu Dawud 5045');
";

/// A SQLite store file in its own temporary directory.
pub struct TestStore {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestStore {
    /// Store with the schema and seed rows.
    pub fn seeded() -> Self {
        Self::with_sql(&format!("{SCHEMA}{SEED}"))
    }

    /// Store with the schema and no rows.
    pub fn empty() -> Self {
        Self::with_sql(SCHEMA)
    }

    /// Store built from arbitrary SQL.
    pub fn with_sql(sql: &str) -> Self {
        let store = Self::missing();
        let conn = Connection::open(&store.path).unwrap();
        conn.execute_batch(sql).unwrap();
        conn.close().unwrap();
        store
    }

    /// A path inside a temporary directory with no file behind it.
    pub fn missing() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dua_main.sqlite");
        Self { _dir: dir, path }
    }

    /// A file that exists but is not a SQLite database.
    pub fn corrupt() -> Self {
        let store = Self::missing();
        std::fs::write(&store.path, "this is not a sqlite database ".repeat(200)).unwrap();
        store
    }

    /// Database pointing at this store's file.
    pub fn database(&self) -> Database {
        Database::new(&self.path)
    }

    /// Router over this store with default CORS and tracing disabled.
    pub fn router(&self) -> Router {
        self.router_with(RouterConfig::new())
    }

    /// Router over this store with the given config and tracing disabled.
    pub fn router_with(&self, config: RouterConfig) -> Router {
        create_router(self.database(), config.with_tracing(false))
    }
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Send a GET request and return the raw response.
pub async fn send(router: Router, request: Request<Body>) -> Response {
    router.oneshot(request).await.unwrap()
}

/// Send a GET request and decode the JSON body.
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = send(router, request).await;
    let status = response.status();
    (status, body_json(response).await)
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Extract an array body, panicking with the body if it is not one.
pub fn as_array(body: &Value) -> &Vec<Value> {
    body.as_array()
        .unwrap_or_else(|| panic!("expected JSON array, got {body}"))
}
