//! Aggregate views over a collection of stored reports.
//!
//! Everything here is recomputed from the full report set on each call;
//! nothing is incrementally maintained. Both entry points are total: an
//! empty collection yields zeroed totals and empty maps, never an error.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::report::{Category, Report, Severity};

/// Number of calendar-day buckets in the recent-trend view.
pub const TREND_WINDOW_DAYS: u64 = 7;

/// Maximum number of entities reported by the leaderboard.
pub const TOP_ENTITY_LIMIT: usize = 10;

// ─── Views ───────────────────────────────────────────────────────────────────

/// One entry in the entity leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCount {
  pub entity: String,
  pub count:  u64,
}

/// One calendar-day bucket of the recent trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
  pub date:  NaiveDate,
  pub count: u64,
}

/// Point-in-time summary of the whole report collection. Tally maps carry
/// only the values that actually occur; absent keys mean zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
  pub total:        u64,
  pub by_category:  BTreeMap<Category, u64>,
  pub by_severity:  BTreeMap<Severity, u64>,
  pub top_entities: Vec<EntityCount>,
  pub trend:        Vec<TrendPoint>,
}

/// Summary of the reports created within the last `days` days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendReport {
  pub days:          u32,
  pub total_entries: u64,
  /// Mean reports per day over the window, rendered to two decimals.
  pub avg_per_day:   String,
  pub by_category:   BTreeMap<Category, u64>,
  pub by_severity:   BTreeMap<Severity, u64>,
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Summarize the full collection as of the given instant (`None` for now).
///
/// `total` and the tallies cover every report; only the trend buckets are
/// windowed, to the [`TREND_WINDOW_DAYS`] calendar days ending on the
/// `as_of` date, oldest first.
pub fn snapshot(
  reports: &[Report],
  as_of: Option<DateTime<Utc>>,
) -> AnalyticsSnapshot {
  let as_of = as_of.unwrap_or_else(Utc::now);

  AnalyticsSnapshot {
    total:        reports.len() as u64,
    by_category:  tally(reports, |r| r.annotation.category),
    by_severity:  tally(reports, |r| r.annotation.severity),
    top_entities: top_entities(reports),
    trend:        recent_trend(reports, as_of.date_naive()),
  }
}

/// Summarize the reports created within `days` days of the given instant
/// (`None` for now). `days` is assumed positive; the request layer
/// normalizes malformed values before calling in.
pub fn trend_report(
  reports: &[Report],
  days: u32,
  as_of: Option<DateTime<Utc>>,
) -> TrendReport {
  let as_of = as_of.unwrap_or_else(Utc::now);
  // A window too wide for the calendar covers everything.
  let cutoff = as_of.checked_sub_signed(TimeDelta::days(i64::from(days)));
  let recent: Vec<&Report> = reports
    .iter()
    .filter(|r| cutoff.is_none_or(|cutoff| r.created_at >= cutoff))
    .collect();

  let total_entries = recent.len() as u64;
  TrendReport {
    days,
    total_entries,
    avg_per_day: format!("{:.2}", total_entries as f64 / f64::from(days)),
    by_category: tally(recent.iter().copied(), |r| r.annotation.category),
    by_severity: tally(recent.iter().copied(), |r| r.annotation.severity),
  }
}

// ─── Building blocks ─────────────────────────────────────────────────────────

fn tally<'a, K, I>(
  reports: I,
  key: impl Fn(&Report) -> K,
) -> BTreeMap<K, u64>
where
  K: Ord,
  I: IntoIterator<Item = &'a Report>,
{
  let mut counts = BTreeMap::new();
  for report in reports {
    *counts.entry(key(report)).or_insert(0) += 1;
  }
  counts
}

/// Count how many reports mention each entity (duplicates within a single
/// report were already collapsed at interpretation time), sort descending
/// by count and keep the top [`TOP_ENTITY_LIMIT`]. Ties keep the order in
/// which the entities were first encountered, which the stable sort
/// preserves.
fn top_entities(reports: &[Report]) -> Vec<EntityCount> {
  let mut counts: Vec<EntityCount> = Vec::new();
  for report in reports {
    for entity in &report.annotation.entities {
      match counts.iter_mut().find(|c| c.entity == *entity) {
        Some(c) => c.count += 1,
        None => counts.push(EntityCount { entity: entity.clone(), count: 1 }),
      }
    }
  }
  counts.sort_by(|a, b| b.count.cmp(&a.count));
  counts.truncate(TOP_ENTITY_LIMIT);
  counts
}

/// Bucket reports by the calendar date of `created_at` over the window
/// ending on `as_of`, oldest bucket first. Every bucket is present even
/// when its count is zero.
fn recent_trend(reports: &[Report], as_of: NaiveDate) -> Vec<TrendPoint> {
  (0..TREND_WINDOW_DAYS)
    .rev()
    .map(|back| {
      let date = as_of - Days::new(back);
      let count = reports
        .iter()
        .filter(|r| r.created_at.date_naive() == date)
        .count() as u64;
      TrendPoint { date, count }
    })
    .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
