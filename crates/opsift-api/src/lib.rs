//! JSON REST API for opsift.
//!
//! Exposes an axum [`Router`] backed by any
//! [`opsift_core::store::ReportStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", opsift_api::api_router(store.clone()))
//! ```

pub mod analytics;
pub mod error;
pub mod reports;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;

use opsift_core::store::ReportStore;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`. Every
/// field has a default so the server starts without a config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("opsift.db") }

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ReportStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Reports
    .route(
      "/reports",
      get(reports::list::<S>).post(reports::create::<S>),
    )
    .route(
      "/reports/{id}",
      get(reports::get_one::<S>).delete(reports::delete_one::<S>),
    )
    // Analytics
    .route("/analytics", get(analytics::snapshot::<S>))
    .route("/analytics/trend", get(analytics::trend::<S>))
    .with_state(store)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use opsift_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    app.clone().oneshot(req).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn create_report(app: &Router, text: &str) -> Value {
    let resp =
      send(app, "POST", "/reports", Some(json!({ "text": text }))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
  }

  // ── Reports ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_interprets_the_submission() {
    let app = app().await;

    let report =
      create_report(&app, "Motor overheating after 3 hours").await;
    assert!(report["report_id"].is_string());
    assert!(report["created_at"].is_string());
    assert_eq!(report["raw_text"], "Motor overheating after 3 hours");
    assert_eq!(report["annotation"]["category"], "issue");
    assert_eq!(report["annotation"]["severity"], "low");
    assert_eq!(report["annotation"]["entities"], json!(["Motor"]));
    assert_eq!(report["annotation"]["metrics"]["duration"], "3 hours");
  }

  #[tokio::test]
  async fn create_trims_before_storing() {
    let app = app().await;
    let report = create_report(&app, "  spaced out note  ").await;
    assert_eq!(report["raw_text"], "spaced out note");
  }

  #[tokio::test]
  async fn create_rejects_blank_text() {
    let app = app().await;
    let resp =
      send(&app, "POST", "/reports", Some(json!({ "text": "   " }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "text must not be empty");
  }

  #[tokio::test]
  async fn get_returns_the_stored_report() {
    let app = app().await;
    let created = create_report(&app, "Delay in shipment from vendor X").await;
    let id = created["report_id"].as_str().unwrap().to_owned();

    let resp = send(&app, "GET", &format!("/reports/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = json_body(resp).await;
    assert_eq!(fetched, created);
  }

  #[tokio::test]
  async fn get_missing_returns_404() {
    let app = app().await;
    let resp =
      send(&app, "GET", &format!("/reports/{}", Uuid::new_v4()), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn missing_report_error_names_the_id() {
    let app = app().await;
    let id = Uuid::new_v4();

    let resp = send(&app, "GET", &format!("/reports/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = json_body(resp).await;
    assert_eq!(body["error"], format!("report {id} not found"));
  }

  #[tokio::test]
  async fn list_returns_reports_in_creation_order() {
    let app = app().await;
    create_report(&app, "first note").await;
    create_report(&app, "second note").await;
    create_report(&app, "third note").await;

    let resp = send(&app, "GET", "/reports", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list = json_body(resp).await;
    let texts: Vec<&str> = list
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["raw_text"].as_str().unwrap())
      .collect();
    assert_eq!(texts, ["first note", "second note", "third note"]);
  }

  #[tokio::test]
  async fn list_filters_by_category() {
    let app = app().await;
    create_report(&app, "motor failure on line 2").await;
    create_report(&app, "shipment delayed again").await;

    let resp = send(&app, "GET", "/reports?category=issue", None).await;
    let list = json_body(resp).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["raw_text"], "motor failure on line 2");
  }

  #[tokio::test]
  async fn list_filters_by_free_text() {
    let app = app().await;
    create_report(&app, "Delay in shipment from vendor X").await;
    create_report(&app, "motor failure on line 2").await;

    let resp = send(&app, "GET", "/reports?q=vendor", None).await;
    let list = json_body(resp).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["raw_text"], "Delay in shipment from vendor X");
  }

  #[tokio::test]
  async fn list_pages_with_limit_and_offset() {
    let app = app().await;
    create_report(&app, "first note").await;
    create_report(&app, "second note").await;
    create_report(&app, "third note").await;

    let resp = send(&app, "GET", "/reports?limit=1&offset=1", None).await;
    let list = json_body(resp).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["raw_text"], "second note");
  }

  #[tokio::test]
  async fn delete_removes_the_report() {
    let app = app().await;
    let created = create_report(&app, "motor failure on line 2").await;
    let id = created["report_id"].as_str().unwrap().to_owned();

    let resp = send(&app, "DELETE", &format!("/reports/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, "GET", &format!("/reports/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, "DELETE", &format!("/reports/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Analytics ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn analytics_on_empty_store_is_zeroed() {
    let app = app().await;

    let resp = send(&app, "GET", "/analytics", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;

    assert_eq!(body["total"], 0);
    assert_eq!(body["by_category"], json!({}));
    assert_eq!(body["by_severity"], json!({}));
    assert_eq!(body["top_entities"], json!([]));
    let trend = body["trend"].as_array().unwrap();
    assert_eq!(trend.len(), 7);
    assert!(trend.iter().all(|p| p["count"] == 0));
  }

  #[tokio::test]
  async fn analytics_tallies_the_collection() {
    let app = app().await;
    create_report(&app, "Motor overheating after 3 hours").await;
    create_report(&app, "Motor crash near the relay").await;
    create_report(&app, "Delay in shipment from vendor X").await;

    let resp = send(&app, "GET", "/analytics", None).await;
    let body = json_body(resp).await;

    assert_eq!(body["total"], 3);
    assert_eq!(body["by_category"], json!({ "issue": 2, "delay": 1 }));
    assert_eq!(body["by_severity"], json!({ "low": 3 }));
    assert_eq!(
      body["top_entities"][0],
      json!({ "entity": "Motor", "count": 2 })
    );

    // All three land inside the 7-day window.
    let bucketed: u64 = body["trend"]
      .as_array()
      .unwrap()
      .iter()
      .map(|p| p["count"].as_u64().unwrap())
      .sum();
    assert_eq!(bucketed, 3);
  }

  #[tokio::test]
  async fn trend_defaults_to_thirty_days() {
    let app = app().await;
    create_report(&app, "first note").await;
    create_report(&app, "second note").await;
    create_report(&app, "third note").await;

    let resp = send(&app, "GET", "/analytics/trend", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;

    assert_eq!(body["days"], 30);
    assert_eq!(body["total_entries"], 3);
    assert_eq!(body["avg_per_day"], "0.10");
  }

  #[tokio::test]
  async fn trend_accepts_an_explicit_window() {
    let app = app().await;
    create_report(&app, "first note").await;
    create_report(&app, "second note").await;
    create_report(&app, "third note").await;

    let resp = send(&app, "GET", "/analytics/trend?days=7", None).await;
    let body = json_body(resp).await;

    assert_eq!(body["days"], 7);
    assert_eq!(body["avg_per_day"], "0.43");
  }

  #[tokio::test]
  async fn trend_normalizes_malformed_days() {
    let app = app().await;

    for uri in [
      "/analytics/trend?days=abc",
      "/analytics/trend?days=0",
      "/analytics/trend?days=-5",
      "/analytics/trend?days=",
    ] {
      let resp = send(&app, "GET", uri, None).await;
      assert_eq!(resp.status(), StatusCode::OK, "uri: {uri}");
      let body = json_body(resp).await;
      assert_eq!(body["days"], 30, "uri: {uri}");
    }
  }

  #[tokio::test]
  async fn trend_tallies_only_the_window() {
    let app = app().await;
    create_report(&app, "motor failure on line 2").await;

    let resp = send(&app, "GET", "/analytics/trend?days=1", None).await;
    let body = json_body(resp).await;

    assert_eq!(body["days"], 1);
    assert_eq!(body["total_entries"], 1);
    assert_eq!(body["avg_per_day"], "1.00");
    assert_eq!(body["by_category"], json!({ "issue": 1 }));
  }

  // ── Configuration ───────────────────────────────────────────────────────

  #[test]
  fn server_config_defaults_apply() {
    let cfg: ServerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.store_path, PathBuf::from("opsift.db"));
  }
}
