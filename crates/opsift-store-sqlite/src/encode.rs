//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, enumerations as their lowercase names, and the entity list and
//! metric map as compact JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use opsift_core::report::{
  Annotation, Category, MetricKind, MetricValue, Report, Severity,
};

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Category ────────────────────────────────────────────────────────────────

pub fn encode_category(c: Category) -> &'static str {
  match c {
    Category::Event => "event",
    Category::Issue => "issue",
    Category::Delay => "delay",
    Category::Quality => "quality",
  }
}

pub fn decode_category(s: &str) -> Result<Category> {
  match s {
    "event" => Ok(Category::Event),
    "issue" => Ok(Category::Issue),
    "delay" => Ok(Category::Delay),
    "quality" => Ok(Category::Quality),
    other => Err(Error::UnknownCategory(other.to_owned())),
  }
}

// ─── Severity ────────────────────────────────────────────────────────────────

pub fn encode_severity(s: Severity) -> &'static str {
  match s {
    Severity::Low => "low",
    Severity::Medium => "medium",
    Severity::High => "high",
  }
}

pub fn decode_severity(s: &str) -> Result<Severity> {
  match s {
    "low" => Ok(Severity::Low),
    "medium" => Ok(Severity::Medium),
    "high" => Ok(Severity::High),
    other => Err(Error::UnknownSeverity(other.to_owned())),
  }
}

// ─── Entities ────────────────────────────────────────────────────────────────

pub fn encode_entities(entities: &[String]) -> Result<String> {
  Ok(serde_json::to_string(entities)?)
}

pub fn decode_entities(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Metrics ─────────────────────────────────────────────────────────────────

pub fn encode_metrics(
  metrics: &BTreeMap<MetricKind, MetricValue>,
) -> Result<String> {
  Ok(serde_json::to_string(metrics)?)
}

pub fn decode_metrics(s: &str) -> Result<BTreeMap<MetricKind, MetricValue>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `reports` row.
pub struct RawReport {
  pub report_id:  String,
  pub raw_text:   String,
  pub created_at: String,
  pub category:   String,
  pub severity:   String,
  pub entities:   String,
  pub metrics:    String,
}

impl RawReport {
  pub fn into_report(self) -> Result<Report> {
    Ok(Report {
      report_id:  decode_uuid(&self.report_id)?,
      raw_text:   self.raw_text,
      created_at: decode_dt(&self.created_at)?,
      annotation: Annotation {
        category: decode_category(&self.category)?,
        severity: decode_severity(&self.severity)?,
        entities: decode_entities(&self.entities)?,
        metrics:  decode_metrics(&self.metrics)?,
      },
    })
  }
}
