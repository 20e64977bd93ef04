//! SQL schema for the opsift SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Reports are immutable: rows are inserted and deleted, never updated.
CREATE TABLE IF NOT EXISTS reports (
    report_id   TEXT PRIMARY KEY,
    raw_text    TEXT NOT NULL,
    created_at  TEXT NOT NULL,              -- ISO 8601 UTC; server-assigned
    category    TEXT NOT NULL,              -- 'event' | 'issue' | 'delay' | 'quality'
    severity    TEXT NOT NULL,              -- 'low' | 'medium' | 'high'
    entities    TEXT NOT NULL DEFAULT '[]', -- JSON array of matched spans
    metrics     TEXT NOT NULL DEFAULT '{}'  -- JSON object, kind -> value
);

CREATE INDEX IF NOT EXISTS reports_category_idx ON reports(category);
CREATE INDEX IF NOT EXISTS reports_severity_idx ON reports(severity);
CREATE INDEX IF NOT EXISTS reports_created_idx  ON reports(created_at);

PRAGMA user_version = 1;
";
