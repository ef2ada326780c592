use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading from the SQLite store
#[derive(Debug, Error)]
pub enum DbError {
    /// The store file could not be opened
    #[error("Failed to connect to the database")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A listing statement failed to prepare, execute or decode
    #[error("Failed to fetch {resource}")]
    Query {
        resource: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// The connection reported an error while being closed
    #[error("Failed to close the database connection")]
    Close {
        #[source]
        source: rusqlite::Error,
    },

    /// The blocking worker running the query did not complete
    #[error("Database worker failed: {0}")]
    Worker(String),

    /// The handle was used after its connection was closed
    #[error("Database handle already released")]
    Released,
}

impl DbError {
    /// Raw driver message for the error, without the summary prefix.
    pub fn detail(&self) -> String {
        match self {
            DbError::Connection { source, .. }
            | DbError::Query { source, .. }
            | DbError::Close { source } => source.to_string(),
            DbError::Worker(message) => message.clone(),
            DbError::Released => self.to_string(),
        }
    }
}
