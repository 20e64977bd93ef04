//! Handlers for `/analytics` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/analytics` | Full-collection snapshot with 7-day trend |
//! | `GET`  | `/analytics/trend` | Optional `?days=N`, default 30 |
//!
//! Both views are recomputed from the full stored report set on every
//! request; nothing is cached or incrementally maintained.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;

use opsift_core::{
  analytics::{AnalyticsSnapshot, TrendReport},
  store::{ReportQuery, ReportStore},
};

use crate::error::ApiError;

/// Window length used when `days` is missing or malformed.
const DEFAULT_TREND_DAYS: u32 = 30;

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// `GET /analytics`
pub async fn snapshot<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<AnalyticsSnapshot>, ApiError>
where
  S: ReportStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let reports = store
    .list(&ReportQuery::default())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(opsift_core::analytics::snapshot(&reports, None)))
}

// ─── Trend ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TrendParams {
  /// Accepted as a raw string so malformed values degrade to the default
  /// instead of rejecting the request.
  pub days: Option<String>,
}

/// `GET /analytics/trend[?days=N]`
pub async fn trend<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<TrendParams>,
) -> Result<Json<TrendReport>, ApiError>
where
  S: ReportStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let days = params
    .days
    .as_deref()
    .and_then(|s| s.parse::<u32>().ok())
    .filter(|d| *d > 0)
    .unwrap_or(DEFAULT_TREND_DAYS);

  let reports = store
    .list(&ReportQuery::default())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(opsift_core::analytics::trend_report(
    &reports, days, None,
  )))
}
