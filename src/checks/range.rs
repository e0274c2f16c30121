use opsmon_types::{RangeRule, RangeStats};

/// Count values outside the rule's bounds.
///
/// Nulls never violate but still count towards the rate's denominator.
/// An empty series yields zero violations at rate 0.
pub fn range_check(values: &[Option<f64>], rule: &RangeRule) -> RangeStats {
    if values.is_empty() {
        return RangeStats::default();
    }

    let violations = values.iter().flatten().filter(|v| rule.violates(**v)).count();

    RangeStats {
        violations,
        rate: violations as f64 / values.len() as f64,
    }
}
