//! Error types for the monitoring engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a monitoring run.
///
/// Degenerate data (empty windows, constant series, unconfigured metrics)
/// is never an error; only malformed input or configuration is.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader failed.
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required input column is absent.
    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    /// A timestamp could not be parsed.
    #[error("Invalid timestamp '{value}' on line {line}")]
    InvalidTimestamp { line: usize, value: String },

    /// A value could not be parsed as a number.
    #[error("Invalid value '{value}' in column '{column}' on line {line}")]
    InvalidValue {
        line: usize,
        column: String,
        value: String,
    },

    /// The configuration is missing, malformed, or out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Report serialization failed.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
