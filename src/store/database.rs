//! Per-request connections to the SQLite store.
//!
//! A [`Database`] only knows where the store lives. Each operation acquires a
//! fresh read-only [`Handle`] and the handle closes its connection when it
//! goes out of scope, so early returns, `?` and panics all release it.
//! Close failures are logged and never replace the operation's own result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{params_from_iter, Connection, OpenFlags};
use tracing::{debug, warn};

use crate::error::DbError;

use super::listing::Listing;
use super::row::{read_row, Row};

/// Default store file.
///
/// Relative paths resolve against the process working directory, not the
/// directory holding the executable.
pub const DEFAULT_DATABASE_PATH: &str = "dua_main.sqlite";

// =============================================================================
// Database
// =============================================================================

/// Location of the store file.
///
/// Cheap to clone; holds no open connection.
#[derive(Debug, Clone)]
pub struct Database {
    path: Arc<PathBuf>,
    #[cfg(test)]
    releases: Arc<std::sync::atomic::AtomicUsize>,
}

impl Database {
    /// Create a database pointing at the given store file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            #[cfg(test)]
            releases: Arc::default(),
        }
    }

    /// Number of handles from this database whose connection was closed.
    #[cfg(test)]
    pub(crate) fn releases(&self) -> usize {
        self.releases.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store file currently exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Acquire a read-only handle.
    ///
    /// The file is never created: a missing store is a connection error.
    pub fn open(&self) -> Result<Handle, DbError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(self.path.as_path(), flags).map_err(|source| {
            DbError::Connection {
                path: self.path.to_path_buf(),
                source,
            }
        })?;

        debug!(path = %self.path.display(), "Opened database handle");

        Ok(Handle {
            conn: Some(conn),
            path: Arc::clone(&self.path),
            #[cfg(test)]
            releases: Arc::clone(&self.releases),
        })
    }

    /// Acquire a handle, run `f` with it, then release it.
    ///
    /// The handle is released on every path out of `f`. A release failure is
    /// logged and the result of `f` is returned unchanged.
    pub fn with_handle<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Handle) -> Result<T, E>,
        E: From<DbError>,
    {
        let handle = self.open()?;
        let result = f(&handle);

        let path = Arc::clone(&handle.path);
        if let Err(err) = handle.close() {
            log_release_failure(&path, &err);
        }

        result
    }

    /// Async form of [`with_handle`](Self::with_handle).
    ///
    /// The whole acquire, use, release cycle runs on tokio's blocking pool.
    pub async fn run<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Handle) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<DbError> + Send + 'static,
    {
        let database = self.clone();

        match tokio::task::spawn_blocking(move || database.with_handle(f)).await {
            Ok(result) => result,
            Err(err) => Err(DbError::Worker(err.to_string()).into()),
        }
    }
}

// =============================================================================
// Handle
// =============================================================================

/// A live read-only connection, closed when dropped.
pub struct Handle {
    conn: Option<Connection>,
    path: Arc<PathBuf>,
    #[cfg(test)]
    releases: Arc<std::sync::atomic::AtomicUsize>,
}

impl Handle {
    /// Run a listing and return every row it produces.
    pub fn fetch(&self, listing: Listing<'_>) -> Result<Vec<Row>, DbError> {
        let conn = self.conn.as_ref().ok_or(DbError::Released)?;

        let resource = listing.resource();
        let query_error = |source: rusqlite::Error| DbError::Query { resource, source };

        let mut stmt = conn.prepare(listing.sql()).map_err(query_error)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let rows = stmt
            .query_map(params_from_iter(listing.param()), |row| {
                read_row(&columns, row)
            })
            .map_err(query_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_error)?;

        debug!(resource, count = rows.len(), "Fetched rows");

        Ok(rows)
    }

    /// Close the connection now, reporting any error.
    pub fn close(mut self) -> Result<(), DbError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), DbError> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        #[cfg(test)]
        self.releases
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        conn.close().map_err(|(_, source)| DbError::Close { source })
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            log_release_failure(&self.path, &err);
        }
    }
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("path", &self.path)
            .field("open", &self.conn.is_some())
            .finish()
    }
}

fn log_release_failure(path: &Path, err: &DbError) {
    warn!(
        path = %path.display(),
        error = %err.detail(),
        "Error closing the database connection"
    );
}

// =============================================================================
// Tests
// =============================================================================
