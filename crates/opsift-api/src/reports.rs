//! Handlers for `/reports` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/reports` | Optional `?category=`, `?severity=`, `?q=`, `?limit=`, `?offset=` |
//! | `POST`   | `/reports` | Body: `{"text":"..."}`; the text is interpreted once, here |
//! | `GET`    | `/reports/:id` | 404 if not found |
//! | `DELETE` | `/reports/:id` | 204 on success, 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use opsift_core::{
  report::{Category, NewReport, Report, Severity},
  store::{ReportQuery, ReportStore},
};

use crate::error::ApiError;

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub category: Option<Category>,
  pub severity: Option<Severity>,
  /// Free-text substring filter over raw text and stored entities.
  pub q:        Option<String>,
  pub limit:    Option<usize>,
  pub offset:   Option<usize>,
}

/// `GET /reports[?category=...][&severity=...][&q=...][&limit=...][&offset=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Report>>, ApiError>
where
  S: ReportStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = ReportQuery {
    category: params.category,
    severity: params.severity,
    text:     params.q,
    limit:    params.limit,
    offset:   params.offset,
  };

  let reports = store
    .list(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(reports))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub text: String,
}

/// `POST /reports` — body: `{"text":"motor failure on line 2"}`
///
/// The submission is trimmed and interpreted exactly once; the stored
/// annotation never changes afterwards.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ReportStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let text = body.text.trim();
  if text.is_empty() {
    return Err(ApiError::InvalidSubmission(
      "text must not be empty".to_owned(),
    ));
  }

  let report = store
    .append(NewReport::interpret(text))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(report)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /reports/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Report>, ApiError>
where
  S: ReportStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let report = store
    .get(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or(ApiError::ReportNotFound(id))?;
  Ok(Json(report))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /reports/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ReportStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = store
    .delete(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::ReportNotFound(id))
  }
}
