use opsmon_types::MissingnessStats;

use crate::data::Point;

/// Measure gaps between consecutive rows and the share of null values.
///
/// Rows are ordered by timestamp first. The first row contributes a delta of
/// zero, so `missing_rate` is the number of gaps longer than
/// `max_gap_minutes` divided by the number of rows.
pub fn missingness_check(points: &[Point], max_gap_minutes: f64) -> MissingnessStats {
    if points.is_empty() {
        return MissingnessStats::default();
    }

    let mut timestamps: Vec<_> = points.iter().map(|p| p.timestamp).collect();
    timestamps.sort();

    let gaps = timestamps
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_milliseconds() as f64 / 60_000.0);

    let mut violations = 0usize;
    let mut max_gap = 0.0f64;
    for gap in gaps {
        if gap > max_gap_minutes {
            violations += 1;
        }
        max_gap = max_gap.max(gap);
    }

    let rows = points.len() as f64;
    let nulls = points.iter().filter(|p| p.value.is_none()).count();

    MissingnessStats {
        missing_rate: violations as f64 / rows,
        max_gap_minutes: max_gap,
        nan_rate: nulls as f64 / rows,
    }
}
