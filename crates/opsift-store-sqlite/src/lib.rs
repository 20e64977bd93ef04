//! SQLite backend for the opsift report store.
//!
//! A single `reports` table holds one row per submission: identity and raw
//! text in plain columns, the interpreted annotation split across `category`
//! and `severity` columns plus JSON-encoded `entities` and `metrics`. Rows
//! are appended and deleted, never updated, matching the immutable-report
//! contract of [`opsift_core::store::ReportStore`].
//!
//! Database access goes through a [`tokio_rusqlite`] connection, so queries
//! run on a dedicated thread without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
