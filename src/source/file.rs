//! CSV file source.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use opsmon_types::Observation;

use super::ObservationSource;
use crate::config::ColumnNames;
use crate::data::{parse_timestamp, Table};
use crate::error::{Error, Result};

/// Spellings treated as a missing value.
const NULL_TOKENS: &[&str] = &["nan", "null", "na", "n/a", "none"];

/// A source that reads observations from a headered CSV file.
///
/// Column names come from the configuration. Any structural problem (missing
/// column, bad timestamp, non-numeric value) fails the whole load rather than
/// skipping rows.
#[derive(Debug)]
pub struct CsvSource {
    path: PathBuf,
    description: String,
}

impl CsvSource {
    /// Create a new source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("csv: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ObservationSource for CsvSource {
    fn load(&mut self, columns: &ColumnNames) -> Result<Table> {
        let file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let table = read_table(file, columns)?;
        debug!(rows = table.len(), path = %self.path.display(), "loaded observations");
        Ok(table)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Read a CSV table from any reader.
pub fn read_table<R: Read>(reader: R, columns: &ColumnNames) -> Result<Table> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();

    let ts_idx = column_index(&headers, &columns.timestamp)?;
    let source_idx = column_index(&headers, &columns.source)?;
    let metric_idx = column_index(&headers, &columns.metric)?;
    let value_idx = column_index(&headers, &columns.value)?;

    let mut table = Table::default();
    for (idx, record) in reader.records().enumerate() {
        // records() starts after the header, and lines are 1-based
        let line = idx + 2;
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("");

        let raw_ts = field(ts_idx);
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| Error::InvalidTimestamp {
            line,
            value: raw_ts.to_string(),
        })?;

        let raw_value = field(value_idx);
        let value = parse_value(raw_value).ok_or_else(|| Error::InvalidValue {
            line,
            column: columns.value.clone(),
            value: raw_value.to_string(),
        })?;

        table.push(Observation::new(
            timestamp,
            field(source_idx),
            field(metric_idx),
            value,
        ));
    }

    Ok(table)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::MissingColumn {
            column: name.to_string(),
        })
}

/// `Some(None)` for a null token, `Some(Some(v))` for a finite number, `None` otherwise.
fn parse_value(raw: &str) -> Option<Option<f64>> {
    if raw.is_empty() || NULL_TOKENS.iter().any(|t| raw.eq_ignore_ascii_case(t)) {
        return Some(None);
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(Some)
}
