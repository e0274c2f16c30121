//! # opsmon
//!
//! A batch data-reliability monitor for tables of metric observations.
//!
//! Given a table of `(timestamp, source, metric, value)` rows and a per-metric
//! configuration, opsmon runs a fixed battery of checks over every
//! (source, metric) series and produces a reliability card for each one: a
//! score out of 100, a list of findings, and the statistics behind them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  ┌─────────┐    ┌─────────┐    ┌──────────┐    ┌──────────────┐ │
//! │  │ source  │───▶│  data   │───▶│  window  │───▶│    checks    │ │
//! │  │ (input) │    │ (Table) │    │ (split)  │    │ (statistics) │ │
//! │  └─────────┘    └─────────┘    └──────────┘    └──────┬───────┘ │
//! │       ▲                                               │         │
//! │  CsvSource | MemorySource                             ▼         │
//! │                 ┌─────────┐    ┌──────────┐    ┌──────────────┐ │
//! │                 │ report  │◀───│ scoring  │◀───│   findings   │ │
//! │                 │(JSON/HTML)   │ (score)  │    │  (severity)  │ │
//! │                 └─────────┘    └──────────┘    └──────────────┘ │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: input abstraction ([`ObservationSource`]) with CSV and
//!   in-memory implementations
//! - **[`data`]**: the materialized [`Table`] and its grouping by [`GroupKey`]
//! - **[`window`]**: baseline / recent window splitting
//! - **[`checks`]**: range, missingness, distribution shift and integrity
//! - **[`findings`]**: turns statistics into severity-graded [`Finding`]s
//! - **[`scoring`]**: weighted penalties and the reliability score
//! - **[`runner`]**: the orchestration of all of the above, plus the mean drift
//!   comparison between windows
//! - **[`report`]**: `report.json` and `report.html` writers
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! opsmon generate --output data/sample.csv
//! opsmon monitor --input data/sample.csv --config opsmon.toml --outdir reports
//! ```
//!
//! ### As a library
//!
//! ```
//! use chrono::{Duration, NaiveDate};
//! use opsmon::{run_monitoring, Config, MetricConfig, Observation, Table};
//!
//! let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let table: Table = (0..40)
//!     .map(|i| Observation::new(start + Duration::days(i), "alpha", "revenue", Some(100.0)))
//!     .collect();
//!
//! let revenue = MetricConfig::builder("revenue")
//!     .min(0.0)
//!     .max_gap_minutes(24.0 * 60.0)
//!     .build();
//! let config = Config::default().with_metric(revenue);
//! let report = run_monitoring(&table, &config);
//!
//! assert_eq!(report.summary.cards, 1);
//! assert_eq!(report.cards[0].score, 100.0);
//! ```

pub mod checks;
pub mod config;
pub mod data;
pub mod error;
pub mod findings;
pub mod generate;
pub mod report;
pub mod runner;
pub mod scoring;
pub mod source;
pub mod window;

// Re-export main types for convenience
pub use crate::config::{ColumnNames, Config};
pub use data::{GroupKey, Point, Table};
pub use error::{Error, Result};
pub use findings::SeverityPolicy;
pub use generate::{generate_observations, generate_to_path, GeneratorOptions};
pub use report::{write_reports, ReportPaths};
pub use runner::{evaluate_group, monitor_source, run_monitoring, run_with_policy, DriftStats};
pub use scoring::{score_findings, Weights};
pub use source::{read_table, CsvSource, MemorySource, ObservationSource};
pub use window::{split_windows, Windows};

pub use opsmon_types::{
    Card, CardStats, CheckCode, Finding, IntegrityStats, MetricConfig, MissingnessStats,
    Observation, RangeRule, RangeStats, Report, ReportSummary, Severity, ShiftStats,
};
