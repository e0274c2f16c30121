use std::collections::HashSet;

use opsmon_types::IntegrityStats;

use crate::data::Point;

/// Count duplicate timestamps and, when `monotonic` is set, decreases in value.
///
/// A duplicate is any row whose timestamp already appeared earlier. A
/// monotonicity violation is an adjacent time-ordered pair of non-null values
/// where the later one is strictly smaller.
pub fn integrity_check(points: &[Point], monotonic: bool) -> IntegrityStats {
    let mut seen = HashSet::with_capacity(points.len());
    let duplicates = points.iter().filter(|p| !seen.insert(p.timestamp)).count();

    let monotonic_violations = if monotonic {
        let mut ordered = points.to_vec();
        ordered.sort_by_key(|p| p.timestamp);
        ordered
            .windows(2)
            .filter(|pair| match (pair[0].value, pair[1].value) {
                (Some(prev), Some(next)) => next < prev,
                _ => false,
            })
            .count()
    } else {
        0
    };

    IntegrityStats {
        duplicates,
        monotonic_violations,
    }
}
