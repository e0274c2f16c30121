//! Structured outputs of the individual checks.

/// Output of the range check.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeStats {
    /// Non-null values below `min` or above `max`.
    pub violations: usize,
    /// `violations` divided by the total number of entries (nulls included).
    pub rate: f64,
}

/// Output of the missingness check.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissingnessStats {
    /// Fraction of consecutive deltas exceeding the allowed gap.
    pub missing_rate: f64,
    /// Largest delta between consecutive rows, in minutes.
    pub max_gap_minutes: f64,
    /// Fraction of rows with a null value.
    pub nan_rate: f64,
}

impl MissingnessStats {
    /// The signal compared against the configured threshold.
    pub fn effective_rate(&self) -> f64 {
        self.missing_rate.max(self.nan_rate)
    }
}

/// Output of the distribution shift check.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftStats {
    pub ks_pvalue: f64,
    pub ks_shift: bool,
    pub psi: f64,
}

impl ShiftStats {
    /// The result used when either window is empty: no evidence of shift.
    pub const fn no_evidence() -> Self {
        Self {
            ks_pvalue: 1.0,
            ks_shift: false,
            psi: 0.0,
        }
    }
}

impl Default for ShiftStats {
    fn default() -> Self {
        Self::no_evidence()
    }
}

/// Output of the integrity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegrityStats {
    /// Rows sharing a timestamp with an earlier row.
    pub duplicates: usize,
    /// Adjacent (time-ordered) pairs where the value decreased.
    pub monotonic_violations: usize,
}

/// Supporting statistics attached to a card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardStats {
    pub range: RangeStats,
    pub missingness: MissingnessStats,
    pub shift: ShiftStats,
}
