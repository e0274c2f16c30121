//! Baseline / recent window splitting.
//!
//! ```text
//!  baseline_start          recent_start              max_ts
//!        │◀── baseline_days ──▶│◀──── recent_days ──────▶│
//!        [ baseline window      )[ recent window          ]
//! ```

use chrono::{Duration, NaiveDateTime};

use crate::data::Point;

/// A group's history split into a reference period and the period under test.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Windows {
    /// Rows with `baseline_start <= timestamp < recent_start`.
    pub baseline: Vec<Point>,
    /// Rows with `timestamp >= recent_start`.
    pub recent: Vec<Point>,
    /// Start of the recent window, `None` for an empty group.
    pub recent_start: Option<NaiveDateTime>,
}

impl Windows {
    /// Non-null baseline values.
    pub fn baseline_values(&self) -> Vec<f64> {
        values(&self.baseline)
    }

    /// Non-null recent values.
    pub fn recent_values(&self) -> Vec<f64> {
        values(&self.recent)
    }
}

fn values(points: &[Point]) -> Vec<f64> {
    points.iter().filter_map(|p| p.value).collect()
}

/// Split `points` into baseline and recent windows anchored at the latest timestamp.
///
/// The windows never overlap. Rows older than the baseline window fall in
/// neither.
pub fn split_windows(points: &[Point], baseline_days: u32, recent_days: u32) -> Windows {
    let Some(max_ts) = points.iter().map(|p| p.timestamp).max() else {
        return Windows::default();
    };

    let recent_start = days_before(max_ts, recent_days);
    let baseline_start = days_before(recent_start, baseline_days);

    let recent = points
        .iter()
        .filter(|p| p.timestamp >= recent_start)
        .copied()
        .collect();
    let baseline = points
        .iter()
        .filter(|p| p.timestamp >= baseline_start && p.timestamp < recent_start)
        .copied()
        .collect();

    Windows {
        baseline,
        recent,
        recent_start: Some(recent_start),
    }
}

/// `ts` minus `days`, saturating at the earliest representable timestamp.
fn days_before(ts: NaiveDateTime, days: u32) -> NaiveDateTime {
    Duration::try_days(i64::from(days))
        .and_then(|span| ts.checked_sub_signed(span))
        .unwrap_or(NaiveDateTime::MIN)
}
