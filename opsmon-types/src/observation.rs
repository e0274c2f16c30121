//! A single timestamped metric reading.

use chrono::NaiveDateTime;

/// One row of the input table.
///
/// Timestamps are naive (UTC when the input carried an offset). A `None`
/// value marks a missing reading; the row itself still counts towards gap and
/// duplicate detection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub source: String,
    pub metric: String,
    pub value: Option<f64>,
}

impl Observation {
    /// Create a new observation.
    pub fn new(
        timestamp: NaiveDateTime,
        source: impl Into<String>,
        metric: impl Into<String>,
        value: Option<f64>,
    ) -> Self {
        Self {
            timestamp,
            source: source.into(),
            metric: metric.into(),
            value,
        }
    }

    /// True when the reading is absent or not a number.
    pub fn is_missing(&self) -> bool {
        self.value.map_or(true, f64::is_nan)
    }
}
