//! In-memory source.

use opsmon_types::Observation;

use super::ObservationSource;
use crate::config::ColumnNames;
use crate::data::Table;
use crate::error::Result;

/// A source backed by observations already in memory.
///
/// Useful when the table is produced by another part of a program (or by a
/// test) rather than read from disk. Column names are irrelevant here.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use opsmon::{ColumnNames, MemorySource, ObservationSource};
/// use opsmon_types::Observation;
///
/// let ts = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let mut source = MemorySource::new(vec![Observation::new(ts, "alpha", "revenue", Some(1.0))]);
/// let table = source.load(&ColumnNames::default()).unwrap();
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<Observation>,
    description: String,
}

impl MemorySource {
    /// Create a source over the given rows.
    pub fn new(rows: Vec<Observation>) -> Self {
        let description = format!("memory: {} rows", rows.len());
        Self { rows, description }
    }
}

impl ObservationSource for MemorySource {
    fn load(&mut self, _columns: &ColumnNames) -> Result<Table> {
        Ok(Table::new(self.rows.clone()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
