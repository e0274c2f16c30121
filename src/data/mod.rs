//! Data models for the input table.
//!
//! ## Submodules
//!
//! - [`table`]: the materialized [`Table`] and its (source, metric) grouping
//! - [`timestamp`]: parsing and formatting of timestamp strings
//!
//! ## Data Flow
//!
//! ```text
//! ObservationSource::load()
//!        │
//!        ▼
//!      Table
//!        │
//!        ▼
//! Table::groups() ──▶ BTreeMap<GroupKey, Vec<Point>> (sorted by time)
//! ```

pub mod table;
pub mod timestamp;

pub use table::{GroupKey, Point, Table};
pub use timestamp::{format_timestamp, parse_timestamp};
