//! The interpreter — a single pure pass that turns an operational note
//! into an [`Annotation`].
//!
//! Classification and severity use ordered keyword tables (first matching
//! group wins); entities and metrics use fixed regex tables. The pipeline
//! is deterministic and total: identical input always yields an identical
//! annotation, and no non-empty input can make it fail. Rejecting blank
//! input is the caller's job.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::{Captures, Regex};

use crate::report::{Annotation, Category, MetricKind, MetricValue, Severity};

// ─── Keyword rules ───────────────────────────────────────────────────────────

/// Category rules in priority order; the first group with any keyword
/// contained in the lower-cased text wins. Matching is plain substring
/// containment, not word-boundary aware, so "failure" triggers `fail` and
/// "escalate" triggers `late`.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
  (Category::Issue, &["fail", "error", "overheat", "crash", "malfunction"]),
  (Category::Delay, &["delay", "late", "postpone"]),
  (Category::Quality, &["qa", "quality", "defect", "inspection"]),
];

/// Severity rules in priority order, same containment semantics.
pub const SEVERITY_RULES: &[(Severity, &[&str])] = &[
  (Severity::High, &["critical", "urgent", "emergency", "severe"]),
  (Severity::Medium, &["important", "significant", "major"]),
];

// ─── Pattern tables ──────────────────────────────────────────────────────────

/// Entity patterns, tried in order against the original-case text so the
/// stored spans keep their natural casing. None of them anchor on word
/// boundaries: "Switchboard" yields both "Switch" and "board".
static ENTITY_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
  [
    compile(
      r"(?i)motor|pcb|board|circuit|sensor|controller|relay|switch|battery|capacitor",
    ),
    compile(r"(?i)version\s+\d+"),
    compile(r"(?i)node\s+[a-z]"),
    compile(r"(?i)vendor\s+[a-z0-9_]+"),
  ]
});

struct MetricRule {
  kind:    MetricKind,
  pattern: Regex,
  /// Builds the stored value from the capture groups; `None` drops the
  /// metric (only reachable through numeric overflow).
  render:  fn(&Captures) -> Option<MetricValue>,
}

/// Metric patterns, each matched at most once (first occurrence only)
/// against the lower-cased text. New metrics are added by appending a row.
static METRIC_RULES: LazyLock<[MetricRule; 4]> = LazyLock::new(|| {
  [
    MetricRule {
      kind:    MetricKind::Duration,
      pattern: compile(r"(\d+)\s*(hour|minute|day|week)s?"),
      render:  duration_value,
    },
    MetricRule {
      kind:    MetricKind::Temperature,
      pattern: compile(r"(\d+)\s*(degree|°|celsius|fahrenheit)"),
      render:  temperature_value,
    },
    MetricRule {
      kind:    MetricKind::Voltage,
      pattern: compile(r"(\d+(?:\.\d+)?)\s*(v|volt|voltage)"),
      render:  voltage_value,
    },
    MetricRule {
      kind:    MetricKind::Quantity,
      pattern: compile(r"(\d+)\s*(unit|piece|item)s?"),
      render:  quantity_value,
    },
  ]
});

fn compile(pattern: &str) -> Regex {
  Regex::new(pattern).expect("hard-coded pattern compiles")
}

// ─── Metric value rendering ──────────────────────────────────────────────────

/// `"3" + "hour"` → `"3 hours"`. The trailing `s` follows the captured
/// digit string coerced to a number, so `"1 hours"` normalizes to
/// `"1 hour"` and `"0 hour"` stays singular.
fn duration_value(caps: &Captures) -> Option<MetricValue> {
  let digits = &caps[1];
  let plural = if digits.parse::<f64>().is_ok_and(|n| n > 1.0) {
    "s"
  } else {
    ""
  };
  Some(MetricValue::Text(format!("{digits} {}{plural}", &caps[2])))
}

/// Fahrenheit and Celsius readings both normalize to a bare degree sign;
/// the unit distinction is intentionally not preserved (the historical
/// rule behaves this way and downstream consumers depend on the shape).
fn temperature_value(caps: &Captures) -> Option<MetricValue> {
  Some(MetricValue::Text(format!("{}°", &caps[1])))
}

fn voltage_value(caps: &Captures) -> Option<MetricValue> {
  Some(MetricValue::Text(format!("{}V", &caps[1])))
}

/// Counts that overflow `u64` drop the metric rather than storing a
/// rounded approximation.
fn quantity_value(caps: &Captures) -> Option<MetricValue> {
  caps[1].parse::<u64>().ok().map(MetricValue::Count)
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Interpret one raw submission into an [`Annotation`].
pub fn interpret(raw_text: &str) -> Annotation {
  let lowered = raw_text.to_lowercase();

  Annotation {
    category: first_match(&lowered, CATEGORY_RULES, Category::Event),
    severity: first_match(&lowered, SEVERITY_RULES, Severity::Low),
    entities: extract_entities(raw_text),
    metrics:  extract_metrics(&lowered),
  }
}

fn first_match<T: Copy>(
  lowered: &str,
  rules: &[(T, &[&str])],
  fallback: T,
) -> T {
  rules
    .iter()
    .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
    .map_or(fallback, |(value, _)| *value)
}

/// Collect all matches per pattern in text order, then deduplicate matched
/// spans case-sensitively while preserving first-occurrence order.
fn extract_entities(raw_text: &str) -> Vec<String> {
  let mut entities: Vec<String> = Vec::new();
  for pattern in ENTITY_PATTERNS.iter() {
    for m in pattern.find_iter(raw_text) {
      if !entities.iter().any(|e| e == m.as_str()) {
        entities.push(m.as_str().to_owned());
      }
    }
  }
  entities
}

fn extract_metrics(lowered: &str) -> BTreeMap<MetricKind, MetricValue> {
  let mut metrics = BTreeMap::new();
  for rule in METRIC_RULES.iter() {
    if let Some(caps) = rule.pattern.captures(lowered)
      && let Some(value) = (rule.render)(&caps)
    {
      metrics.insert(rule.kind, value);
    }
  }
  metrics
}

// ─── Tests ───────────────────────────────────────────────────────────────────
