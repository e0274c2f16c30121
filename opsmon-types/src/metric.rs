//! Per-metric monitoring configuration.

/// Default length of the baseline window, in days.
pub const DEFAULT_BASELINE_DAYS: u32 = 30;
/// Default length of the recent window, in days.
pub const DEFAULT_RECENT_DAYS: u32 = 7;
/// Default number of PSI bins.
pub const DEFAULT_PSI_BINS: usize = 10;
/// Default KS significance level.
pub const DEFAULT_KS_ALPHA: f64 = 0.05;
/// Default missingness rate above which a finding is raised.
pub const DEFAULT_MISSINGNESS_THRESHOLD: f64 = 0.02;
/// Default maximum allowed gap between consecutive rows, in minutes.
pub const DEFAULT_MAX_GAP_MINUTES: f64 = 60.0;

/// Allowed value range for a metric. Either bound may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeRule {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub min: Option<f64>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub max: Option<f64>,
}

impl RangeRule {
    /// Create a rule with the given bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// A rule with no bounds; never reports violations.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Check if a value falls outside the configured bounds.
    pub fn violates(&self, value: f64) -> bool {
        self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| value > max)
    }
}

/// Monitoring settings for one metric name.
///
/// Looked up by metric name; groups whose metric has no entry are not
/// monitored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricConfig {
    pub name: String,
    pub range: RangeRule,
    pub baseline_days: u32,
    pub recent_days: u32,
    pub psi_bins: usize,
    pub ks_alpha: f64,
    pub missingness_threshold: f64,
    pub max_gap_minutes: f64,
    pub monotonic: bool,
}

impl MetricConfig {
    /// Create a config with all defaults for the named metric.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: RangeRule::unbounded(),
            baseline_days: DEFAULT_BASELINE_DAYS,
            recent_days: DEFAULT_RECENT_DAYS,
            psi_bins: DEFAULT_PSI_BINS,
            ks_alpha: DEFAULT_KS_ALPHA,
            missingness_threshold: DEFAULT_MISSINGNESS_THRESHOLD,
            max_gap_minutes: DEFAULT_MAX_GAP_MINUTES,
            monotonic: false,
        }
    }

    /// Create a builder starting from the defaults.
    pub fn builder(name: impl Into<String>) -> MetricConfigBuilder {
        MetricConfigBuilder::new(name)
    }
}

/// Builder for `MetricConfig`.
#[derive(Debug)]
pub struct MetricConfigBuilder {
    config: MetricConfig,
}

impl MetricConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: MetricConfig::new(name),
        }
    }

    /// Set the lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.config.range.min = Some(min);
        self
    }

    /// Set the upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.config.range.max = Some(max);
        self
    }

    /// Replace the whole range rule.
    pub fn range(mut self, range: RangeRule) -> Self {
        self.config.range = range;
        self
    }

    /// Set the baseline window length in days.
    pub fn baseline_days(mut self, days: u32) -> Self {
        self.config.baseline_days = days;
        self
    }

    /// Set the recent window length in days.
    pub fn recent_days(mut self, days: u32) -> Self {
        self.config.recent_days = days;
        self
    }

    /// Set the number of PSI bins.
    pub fn psi_bins(mut self, bins: usize) -> Self {
        self.config.psi_bins = bins;
        self
    }

    /// Set the KS significance level.
    pub fn ks_alpha(mut self, alpha: f64) -> Self {
        self.config.ks_alpha = alpha;
        self
    }

    /// Set the missingness threshold.
    pub fn missingness_threshold(mut self, threshold: f64) -> Self {
        self.config.missingness_threshold = threshold;
        self
    }

    /// Set the maximum allowed gap, in minutes.
    pub fn max_gap_minutes(mut self, minutes: f64) -> Self {
        self.config.max_gap_minutes = minutes;
        self
    }

    /// Require values to be non-decreasing over time.
    pub fn monotonic(mut self, monotonic: bool) -> Self {
        self.config.monotonic = monotonic;
        self
    }

    /// Build the metric config.
    pub fn build(self) -> MetricConfig {
        self.config
    }
}
