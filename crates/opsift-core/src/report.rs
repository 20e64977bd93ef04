//! Report types — the fundamental unit of the opsift store.
//!
//! A report is an immutable pairing of a raw operational note with the
//! annotation the interpreter derived from it. Reports are never updated;
//! the only mutation the store permits is full deletion.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Category ────────────────────────────────────────────────────────────────

/// What kind of operational event a report describes.
///
/// Assigned by the interpreter's ordered keyword rules; [`Category::Event`]
/// is the fallback when no rule fires.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  #[default]
  Event,
  Issue,
  Delay,
  Quality,
}

// ─── Severity ────────────────────────────────────────────────────────────────

/// How urgent a report is. [`Severity::Low`] is the fallback when no rule
/// fires.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  #[default]
  Low,
  Medium,
  High,
}

// ─── Metrics ─────────────────────────────────────────────────────────────────

/// The closed set of metrics the interpreter can extract.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
  Duration,
  Temperature,
  Voltage,
  Quantity,
}

/// An extracted metric value. Unit-bearing readings keep their rendered
/// string form (`"3 hours"`, `"95°"`, `"12V"`); quantities are plain counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
  Count(u64),
  Text(String),
}

// ─── Annotation ──────────────────────────────────────────────────────────────

/// The structured output of [`crate::interpret::interpret`] for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
  pub category: Category,
  pub severity: Severity,
  /// Distinct matched spans in first-occurrence order, verbatim casing.
  pub entities: Vec<String>,
  /// Keys present only when the corresponding pattern matched.
  pub metrics:  BTreeMap<MetricKind, MetricValue>,
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// A stored, immutable report. Once written, no field is ever updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
  pub report_id:  Uuid,
  /// The original trimmed submission; never empty.
  pub raw_text:   String,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
  pub annotation: Annotation,
}

// ─── NewReport ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::ReportStore::append`].
/// `report_id` and `created_at` are always set by the store; they are not
/// accepted from callers.
#[derive(Debug, Clone)]
pub struct NewReport {
  pub raw_text:   String,
  pub annotation: Annotation,
}

impl NewReport {
  /// Interpret `raw_text` and bundle the result for appending.
  pub fn interpret(raw_text: impl Into<String>) -> Self {
    let raw_text = raw_text.into();
    let annotation = crate::interpret::interpret(&raw_text);
    Self { raw_text, annotation }
  }
}
