//! Read-only access to the SQLite store.
//!
//! The store is a single pre-populated file holding three tables:
//!
//! ```text
//! category ──< sub_category (cat_id) ──< dua (subcat_id)
//! ```
//!
//! Nothing here is kept open between requests. Every data operation opens its
//! own [`Handle`], runs exactly one [`Listing`] statement and releases the
//! handle again, whatever the outcome.
//!
//! # Components
//!
//! - [`Database`]: Location of the store file; hands out per-request handles
//! - [`Handle`]: Read-only connection guard, closed on drop
//! - [`Listing`]: The fixed set of statements the API can run
//! - [`Row`]: A result row as a JSON object keyed by column name
//!
//! # Example
//!
//! ```no_run
//! use dua_api::error::DbError;
//! use dua_api::store::{Database, Listing};
//!
//! # async fn demo() -> Result<(), DbError> {
//! let database = Database::new("dua_main.sqlite");
//!
//! let rows = database
//!     .run(|handle| handle.fetch(Listing::Subcategories { category_id: "1" }))
//!     .await?;
//!
//! println!("{} subcategories", rows.len());
//! # Ok(())
//! # }
//! ```

mod database;
mod listing;
mod row;

pub use database::{Database, Handle, DEFAULT_DATABASE_PATH};
pub use listing::Listing;
pub use row::{value_to_json, Row};
