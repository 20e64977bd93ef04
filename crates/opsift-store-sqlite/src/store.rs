//! [`SqliteStore`] — the SQLite implementation of [`ReportStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use opsift_core::{
  report::{NewReport, Report},
  store::{ReportQuery, ReportStore},
};

use crate::{
  encode::{
    encode_category, encode_dt, encode_entities, encode_metrics,
    encode_severity, encode_uuid, RawReport,
  },
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A report store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ReportStore impl ────────────────────────────────────────────────────────

const REPORT_COLUMNS: &str =
  "report_id, raw_text, created_at, category, severity, entities, metrics";

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawReport> {
  Ok(RawReport {
    report_id:  row.get(0)?,
    raw_text:   row.get(1)?,
    created_at: row.get(2)?,
    category:   row.get(3)?,
    severity:   row.get(4)?,
    entities:   row.get(5)?,
    metrics:    row.get(6)?,
  })
}

impl ReportStore for SqliteStore {
  type Error = crate::Error;

  async fn append(&self, input: NewReport) -> Result<Report> {
    let report = Report {
      report_id:  Uuid::new_v4(),
      raw_text:   input.raw_text,
      created_at: Utc::now(),
      annotation: input.annotation,
    };

    let id_str       = encode_uuid(report.report_id);
    let raw_text     = report.raw_text.clone();
    let at_str       = encode_dt(report.created_at);
    let category_str = encode_category(report.annotation.category).to_owned();
    let severity_str = encode_severity(report.annotation.severity).to_owned();
    let entities_str = encode_entities(&report.annotation.entities)?;
    let metrics_str  = encode_metrics(&report.annotation.metrics)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO reports (
             report_id, raw_text, created_at, category, severity,
             entities, metrics
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            raw_text,
            at_str,
            category_str,
            severity_str,
            entities_str,
            metrics_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(report)
  }

  async fn get(&self, id: Uuid) -> Result<Option<Report>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawReport> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {REPORT_COLUMNS} FROM reports WHERE report_id = ?1"
              ),
              rusqlite::params![id_str],
              row_to_raw,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawReport::into_report).transpose()
  }

  async fn list(&self, query: &ReportQuery) -> Result<Vec<Report>> {
    let category_str = query.category.map(encode_category).map(str::to_owned);
    let severity_str = query.severity.map(encode_severity).map(str::to_owned);
    let text_pattern = query.text.as_deref().map(|t| format!("%{t}%"));
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val    = query.limit.map_or(-1, |l| l as i64);
    let offset_val   = query.offset.unwrap_or(0) as i64;

    let raws: Vec<RawReport> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {REPORT_COLUMNS}
           FROM reports
           WHERE (?1 IS NULL OR category = ?1)
             AND (?2 IS NULL OR severity = ?2)
             AND (?3 IS NULL OR raw_text LIKE ?3 OR entities LIKE ?3)
           ORDER BY created_at, rowid
           LIMIT ?4 OFFSET ?5"
        ))?;

        let rows = stmt
          .query_map(
            rusqlite::params![
              category_str.as_deref(),
              severity_str.as_deref(),
              text_pattern.as_deref(),
              limit_val,
              offset_val,
            ],
            row_to_raw,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReport::into_report).collect()
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM reports WHERE report_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(affected > 0)
  }
}
