//! Finding synthesis: turning check statistics into findings.
//!
//! Each check emits at most one finding, and only when its trigger holds.
//! Rate-based checks grade severity with a two-threshold classifier; the
//! others use fixed cut-offs.

use opsmon_types::{
    CheckCode, Finding, IntegrityStats, MissingnessStats, RangeStats, Severity, ShiftStats,
};

use crate::runner::DriftStats;

/// High / medium cut-offs for a rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateThresholds {
    pub high: f64,
    pub medium: f64,
}

impl RateThresholds {
    pub const fn new(high: f64, medium: f64) -> Self {
        Self { high, medium }
    }

    /// Grade a rate: high at or above `high`, medium at or above `medium`, else low.
    pub fn classify(&self, rate: f64) -> Severity {
        if rate >= self.high {
            Severity::High
        } else if rate >= self.medium {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Triggers and severity cut-offs for every check.
#[derive(Debug, Clone, PartialEq)]
pub struct SeverityPolicy {
    pub range: RateThresholds,
    pub missing: RateThresholds,
    /// PSI above which shift fires even without a significant KS test.
    pub shift_psi_trigger: f64,
    /// PSI at or above which a shift is high severity.
    pub shift_psi_high: f64,
    /// Relative mean change above which drift fires.
    pub drift_trigger: f64,
    /// Relative mean change above which drift is high severity.
    pub drift_high: f64,
    /// Duplicate count at or above which an integrity finding is high severity.
    pub integrity_duplicates_high: usize,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            range: RateThresholds::new(0.05, 0.01),
            missing: RateThresholds::new(0.10, 0.03),
            shift_psi_trigger: 0.2,
            shift_psi_high: 0.4,
            drift_trigger: 0.15,
            drift_high: 0.3,
            integrity_duplicates_high: 5,
        }
    }
}

impl SeverityPolicy {
    /// Any value outside the configured range.
    pub fn range(&self, stats: &RangeStats) -> Option<Finding> {
        (stats.rate > 0.0).then(|| {
            Finding::new(
                CheckCode::Range,
                self.range.classify(stats.rate),
                format!("Range violations rate {}", percent(stats.rate, 2)),
            )
        })
    }

    /// Gap or null rate above the metric's configured threshold.
    pub fn missing(&self, stats: &MissingnessStats, threshold: f64) -> Option<Finding> {
        let rate = stats.effective_rate();
        (rate > threshold).then(|| {
            Finding::new(
                CheckCode::Missing,
                self.missing.classify(rate),
                format!("Missingness rate {}", percent(rate, 2)),
            )
        })
    }

    /// Significant KS test or a PSI above the trigger.
    pub fn shift(&self, stats: &ShiftStats) -> Option<Finding> {
        if !(stats.ks_shift || stats.psi > self.shift_psi_trigger) {
            return None;
        }
        let severity = if stats.psi >= self.shift_psi_high {
            Severity::High
        } else {
            Severity::Medium
        };
        Some(Finding::new(
            CheckCode::Shift,
            severity,
            format!(
                "Distribution shift (KS p={:.4}, PSI={:.3})",
                stats.ks_pvalue, stats.psi
            ),
        ))
    }

    /// Relative mean change above the trigger. There is no low tier.
    pub fn drift(&self, stats: &DriftStats) -> Option<Finding> {
        if stats.relative <= self.drift_trigger {
            return None;
        }
        let severity = if stats.relative > self.drift_high {
            Severity::High
        } else {
            Severity::Medium
        };
        Some(Finding::new(
            CheckCode::Drift,
            severity,
            format!("Mean drift {:.3} ({})", stats.delta, percent(stats.relative, 1)),
        ))
    }

    /// Any duplicate timestamp or monotonicity violation. There is no low tier.
    pub fn integrity(&self, stats: &IntegrityStats) -> Option<Finding> {
        if stats.duplicates == 0 && stats.monotonic_violations == 0 {
            return None;
        }
        let severity = if stats.duplicates >= self.integrity_duplicates_high {
            Severity::High
        } else {
            Severity::Medium
        };
        Some(Finding::new(
            CheckCode::Integrity,
            severity,
            format!(
                "Duplicates {}, monotonic violations {}",
                stats.duplicates, stats.monotonic_violations
            ),
        ))
    }
}

fn percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}
