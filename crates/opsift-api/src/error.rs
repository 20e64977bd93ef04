//! Error responses for the report API.
//!
//! Handlers return [`ApiError`]; its [`IntoResponse`] impl maps each
//! variant to a status code and renders one uniform `{"error": "..."}`
//! JSON body, so clients parse a single shape whether a report was
//! missing, a submission was rejected, or the store failed.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// No report exists under the given identifier. Deleting an
  /// already-deleted report lands here too.
  #[error("report {0} not found")]
  ReportNotFound(Uuid),

  /// The submission was rejected before interpretation ran (blank or
  /// whitespace-only text).
  #[error("invalid submission: {0}")]
  InvalidSubmission(String),

  /// The report store failed while reading or writing.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::ReportNotFound(id) => {
        (StatusCode::NOT_FOUND, format!("report {id} not found"))
      }
      ApiError::InvalidSubmission(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
