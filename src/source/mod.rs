//! Observation sources.
//!
//! This module provides a trait-based abstraction for loading the input
//! table, so the runner does not care whether rows come from a CSV file or
//! from memory.

mod file;
mod memory;

pub use file::{read_table, CsvSource};
pub use memory::MemorySource;

use std::fmt::Debug;

use crate::config::ColumnNames;
use crate::data::Table;
use crate::error::Result;

/// Trait for loading a fully materialized observation table.
///
/// # Example
///
/// ```no_run
/// use opsmon::{ColumnNames, CsvSource, ObservationSource};
///
/// let mut source = CsvSource::new("data/sample_timeseries.csv");
/// let table = source.load(&ColumnNames::default())?;
/// println!("Loaded {} rows from {}", table.len(), source.description());
/// # Ok::<(), opsmon::Error>(())
/// ```
pub trait ObservationSource: Debug {
    /// Load every row. Malformed input is an error; nothing is skipped.
    fn load(&mut self, columns: &ColumnNames) -> Result<Table>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}
