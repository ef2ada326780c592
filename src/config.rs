//! Configuration management for the dua API.
//!
//! Configuration is read once at startup from:
//! - Command-line arguments via clap
//! - Environment variables (a `.env` file in the working directory is loaded first)
//! - Defaults for every setting
//!
//! # Environment Variables
//!
//! - `DUA_HOST` - Server bind address (default: 0.0.0.0)
//! - `PORT` - Server port (default: 5000)
//! - `DUA_DATABASE` - Path to the SQLite store (default: dua_main.sqlite)
//! - `DUA_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any origin)
//! - `DUA_CORS_CREDENTIALS` - Allow credentialed CORS requests (default: false)

use std::path::PathBuf;

use clap::Parser;
use http::HeaderValue;

use crate::store::DEFAULT_DATABASE_PATH;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Dua API - A read-only JSON API over a SQLite store of duas.
#[derive(Parser, Debug, Clone)]
#[command(name = "dua-api")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "DUA_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Path to the SQLite store file.
    ///
    /// Opened read-only for each request, never at startup. A relative path
    /// resolves against the working directory the server is started from,
    /// not the directory holding the executable.
    #[arg(long, default_value = DEFAULT_DATABASE_PATH, env = "DUA_DATABASE")]
    pub database: PathBuf,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "DUA_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Allow cross-origin requests with credentials.
    ///
    /// Requires an explicit --cors-origins list.
    #[arg(long, default_value_t = false, env = "DUA_CORS_CREDENTIALS")]
    pub cors_credentials: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.database.as_os_str().is_empty() {
            return Err("Database path is required. Set --database or DUA_DATABASE".to_string());
        }

        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }

        match &self.cors_origins {
            Some(origins) => {
                for origin in origins {
                    if origin == "*" {
                        if self.cors_credentials {
                            return Err(
                                "CORS credentials cannot be combined with a wildcard origin"
                                    .to_string(),
                            );
                        }
                        continue;
                    }
                    if origin.parse::<HeaderValue>().is_err() {
                        return Err(format!("Invalid CORS origin: {:?}", origin));
                    }
                }

                if self.cors_credentials && origins.is_empty() {
                    return Err(
                        "CORS credentials require at least one origin in --cors-origins"
                            .to_string(),
                    );
                }
            }
            None if self.cors_credentials => {
                return Err(
                    "CORS credentials require explicit origins. \
                     Set --cors-origins or DUA_CORS_ORIGINS"
                        .to_string(),
                );
            }
            None => {}
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
