//! # opsmon-types
//!
//! Core types for batch data-reliability monitoring. This crate defines the
//! data model shared by the detection engine and anything that consumes its
//! output (report writers, dashboards, downstream tooling).
//!
//! ## Design Goals
//!
//! - **No decision logic**: checks, windowing and scoring live in `opsmon`
//! - **Optional serialization**: enable the `serde` feature for JSON and friends
//! - **Typed configuration**: per-metric settings are plain structs with defaults
//!   applied at construction time
//! - **Versioned schema**: reports include version info for forward compatibility
//!
//! ## Features
//!
//! - `serde`: serialization via serde (field names match the report JSON schema)
//!
//! ## Example
//!
//! ```rust
//! use opsmon_types::{Card, CheckCode, Finding, Report, Severity};
//!
//! let card = Card::builder("alpha", "revenue")
//!     .score(88.0)
//!     .finding(Finding::new(CheckCode::Range, Severity::High, "Range violations rate 7.00%"))
//!     .build();
//!
//! let report = Report::builder().card(card).build();
//!
//! assert_eq!(report.summary.cards, 1);
//! assert_eq!(report.summary.avg_score, 88.0);
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**.

mod finding;
mod metric;
mod observation;
mod report;
mod stats;
mod version;

pub use finding::*;
pub use metric::*;
pub use observation::*;
pub use report::*;
pub use stats::*;
pub use version::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the report format.
pub const SCHEMA_VERSION: u32 = 1;

/// Round to two decimal places, the precision used for scores in reports.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
