//! The `ReportStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `opsift-store-sqlite`).
//! The HTTP layer (`opsift-api`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::report::{Category, NewReport, Report, Severity};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`ReportStore::list`]. The default value matches
/// everything.
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
  pub category: Option<Category>,
  pub severity: Option<Severity>,
  /// Free-text substring filter over the raw text and stored entities.
  pub text:     Option<String>,
  pub limit:    Option<usize>,
  pub offset:   Option<usize>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a report store backend.
///
/// Reports are immutable once appended; the only supported mutation is full
/// deletion. Listing returns reports in creation order so aggregate views
/// see a stable sequence.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ReportStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new report. The identifier and `created_at` timestamp are
  /// assigned by the store.
  fn append(
    &self,
    input: NewReport,
  ) -> impl Future<Output = Result<Report, Self::Error>> + Send + '_;

  /// Retrieve a report by identifier. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Report>, Self::Error>> + Send + '_;

  /// Return the reports matching `query`, oldest first.
  fn list<'a>(
    &'a self,
    query: &'a ReportQuery,
  ) -> impl Future<Output = Result<Vec<Report>, Self::Error>> + Send + 'a;

  /// Delete a report by identifier. Returns `false` if nothing matched.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
