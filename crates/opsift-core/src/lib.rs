//! Core types and pure logic for the opsift report triage service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! It owns the interpreter (raw text → annotation), the aggregation
//! functions (report collection → derived views), and the storage trait
//! that the outer layers are composed behind.

pub mod analytics;
pub mod interpret;
pub mod report;
pub mod store;
