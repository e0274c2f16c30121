//! Typed configuration loading.
//!
//! Configuration is read from a TOML file and layered with `OPSMON_`
//! environment overrides (nested keys separated by `__`, e.g.
//! `OPSMON_DATA__VALUE_COL=reading`). Defaults are applied once here; the
//! checks only ever see [`MetricConfig`] values.
//!
//! ```toml
//! [data]
//! timestamp_col = "timestamp"
//! value_col = "value"
//!
//! [metrics.revenue]
//! range.min = 0
//! range.max = 10000
//! baseline_days = 30
//! recent_days = 7
//!
//! [scoring.weights]
//! shift = 1.5
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use config::{Environment, File, FileFormat};
use serde::Deserialize;

use opsmon_types::{
    CheckCode, MetricConfig, RangeRule, DEFAULT_BASELINE_DAYS, DEFAULT_KS_ALPHA,
    DEFAULT_MAX_GAP_MINUTES, DEFAULT_MISSINGNESS_THRESHOLD, DEFAULT_PSI_BINS, DEFAULT_RECENT_DAYS,
};

use crate::error::{Error, Result};
use crate::scoring::Weights;

/// Names of the input columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    #[serde(rename = "timestamp_col")]
    pub timestamp: String,
    #[serde(rename = "source_col")]
    pub source: String,
    #[serde(rename = "metric_col")]
    pub metric: String,
    #[serde(rename = "value_col")]
    pub value: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            timestamp: "timestamp".to_string(),
            source: "source".to_string(),
            metric: "metric".to_string(),
            value: "value".to_string(),
        }
    }
}

/// Everything a monitoring run needs besides the data itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub columns: ColumnNames,
    /// Monitored metrics, keyed by metric name.
    pub metrics: BTreeMap<String, MetricConfig>,
    /// Score weights: defaults overlaid with `[scoring.weights]`.
    pub weights: Weights,
}

impl Config {
    /// Load configuration from a TOML file plus environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = config::Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(env_overrides())
            .build()?
            .try_deserialize::<RawConfig>()?;
        raw.resolve()
    }

    /// Parse configuration from TOML text. Environment overrides are not applied.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let raw = config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<RawConfig>()?;
        raw.resolve()
    }

    /// Add or replace a metric.
    pub fn with_metric(mut self, metric: MetricConfig) -> Self {
        self.metrics.insert(metric.name.clone(), metric);
        self
    }

    /// Look up the settings for a metric name.
    pub fn metric(&self, name: &str) -> Option<&MetricConfig> {
        self.metrics.get(name)
    }
}

fn env_overrides() -> Environment {
    Environment::with_prefix("OPSMON")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Raw, untyped-ish shapes as they appear in the file.

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    data: ColumnNames,
    #[serde(default)]
    metrics: BTreeMap<String, RawMetric>,
    #[serde(default)]
    scoring: RawScoring,
}

#[derive(Debug, Default, Deserialize)]
struct RawScoring {
    #[serde(default)]
    weights: BTreeMap<String, f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetric {
    #[serde(default)]
    range: RangeRule,
    baseline_days: Option<i64>,
    recent_days: Option<i64>,
    psi_bins: Option<i64>,
    ks_alpha: Option<f64>,
    missingness_threshold: Option<f64>,
    max_gap_minutes: Option<f64>,
    monotonic: Option<bool>,
}

impl RawConfig {
    fn resolve(self) -> Result<Config> {
        let metrics = self
            .metrics
            .into_iter()
            .map(|(name, raw)| {
                let metric = raw.resolve(&name)?;
                Ok((name, metric))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        let mut overrides = Weights::empty();
        for (code, weight) in self.scoring.weights {
            let code = CheckCode::parse(&code)
                .ok_or_else(|| Error::Config(format!("unknown check code '{code}' in scoring.weights")))?;
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::Config(format!(
                    "scoring.weights.{code} must be a non-negative number"
                )));
            }
            overrides = overrides.with(code, weight);
        }

        Ok(Config {
            columns: self.data,
            metrics,
            weights: Weights::default().merge(&overrides),
        })
    }
}

impl RawMetric {
    fn resolve(self, name: &str) -> Result<MetricConfig> {
        let invalid = |field: &str, rule: &str| {
            Error::Config(format!("metrics.{name}.{field} must be {rule}"))
        };

        let baseline_days = self.baseline_days.unwrap_or(i64::from(DEFAULT_BASELINE_DAYS));
        let baseline_days = u32::try_from(baseline_days)
            .ok()
            .filter(|d| *d >= 1)
            .ok_or_else(|| invalid("baseline_days", "a positive integer"))?;

        let recent_days = self.recent_days.unwrap_or(i64::from(DEFAULT_RECENT_DAYS));
        let recent_days = u32::try_from(recent_days)
            .ok()
            .filter(|d| *d >= 1)
            .ok_or_else(|| invalid("recent_days", "a positive integer"))?;

        let psi_bins = self.psi_bins.unwrap_or(DEFAULT_PSI_BINS as i64);
        let psi_bins = usize::try_from(psi_bins)
            .ok()
            .filter(|b| *b >= 2)
            .ok_or_else(|| invalid("psi_bins", "an integer >= 2"))?;

        let ks_alpha = self.ks_alpha.unwrap_or(DEFAULT_KS_ALPHA);
        if !(ks_alpha > 0.0 && ks_alpha < 1.0) {
            return Err(invalid("ks_alpha", "in (0, 1)"));
        }

        let missingness_threshold = self
            .missingness_threshold
            .unwrap_or(DEFAULT_MISSINGNESS_THRESHOLD);
        if !(missingness_threshold >= 0.0) {
            return Err(invalid("missingness_threshold", ">= 0"));
        }

        let max_gap_minutes = self.max_gap_minutes.unwrap_or(DEFAULT_MAX_GAP_MINUTES);
        if !(max_gap_minutes > 0.0) {
            return Err(invalid("max_gap_minutes", "a positive number"));
        }

        if let (Some(min), Some(max)) = (self.range.min, self.range.max) {
            if min > max {
                return Err(invalid("range.min", "<= range.max"));
            }
        }

        Ok(MetricConfig {
            name: name.to_string(),
            range: self.range,
            baseline_days,
            recent_days,
            psi_bins,
            ks_alpha,
            missingness_threshold,
            max_gap_minutes,
            monotonic: self.monotonic.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[data]
timestamp_col = "ts"
value_col = "reading"

[metrics.revenue]
range.min = 0
range.max = 10000
baseline_days = 5
recent_days = 3
psi_bins = 5
ks_alpha = 0.01
missingness_threshold = 0.05
max_gap_minutes = 1440
monotonic = true

[metrics.clicks]
monotonic = false
"#;

    #[test]
    fn test_parse_full_metric() {
        let cfg = Config::from_toml_str(SAMPLE).unwrap();

        assert_eq!(cfg.columns.timestamp, "ts");
        assert_eq!(cfg.columns.source, "source");
        assert_eq!(cfg.columns.metric, "metric");
        assert_eq!(cfg.columns.value, "reading");

        let revenue = cfg.metric("revenue").unwrap();
        assert_eq!(revenue.range, RangeRule::new(Some(0.0), Some(10000.0)));
        assert_eq!(revenue.baseline_days, 5);
        assert_eq!(revenue.recent_days, 3);
        assert_eq!(revenue.psi_bins, 5);
        assert_eq!(revenue.ks_alpha, 0.01);
        assert_eq!(revenue.missingness_threshold, 0.05);
        assert_eq!(revenue.max_gap_minutes, 1440.0);
        assert!(revenue.monotonic);
    }

    #[test]
    fn test_defaults_applied() {
        let cfg = Config::from_toml_str(SAMPLE).unwrap();
        let clicks = cfg.metric("clicks").unwrap();
        assert_eq!(*clicks, MetricConfig::new("clicks"));
        assert_eq!(cfg.weights, Weights::default());
        assert!(cfg.metric("active_users").is_none());
    }

    #[test]
    fn test_empty_file_uses_default_columns() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.columns, ColumnNames::default());
        assert!(cfg.metrics.is_empty());
    }

    #[test]
    fn test_weight_overrides() {
        let cfg = Config::from_toml_str("[scoring.weights]\nshift = 2.0\n").unwrap();
        assert_eq!(cfg.weights.weight(CheckCode::Shift), 2.0);
        assert_eq!(cfg.weights.weight(CheckCode::Drift), 1.2);
    }

    #[test]
    fn test_unknown_weight_code_rejected() {
        let err = Config::from_toml_str("[scoring.weights]\nlatency = 1.0\n").unwrap_err();
        assert!(err.to_string().contains("latency"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            ("baseline_days = 0", "baseline_days"),
            ("recent_days = -2", "recent_days"),
            ("psi_bins = 1", "psi_bins"),
            ("ks_alpha = 1.5", "ks_alpha"),
            ("missingness_threshold = -0.1", "missingness_threshold"),
            ("max_gap_minutes = 0", "max_gap_minutes"),
            ("range.min = 10\nrange.max = 1", "range.min"),
        ];
        for (line, field) in cases {
            let toml = format!("[metrics.revenue]\n{line}\n");
            let err = Config::from_toml_str(&toml).unwrap_err();
            assert!(
                err.to_string().contains(field),
                "expected error about {field}, got: {err}"
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.metrics.len(), 2);
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        std::env::set_var("OPSMON_DATA__SOURCE_COL", "origin");
        std::env::set_var("OPSMON_METRICS__REVENUE__BASELINE_DAYS", "9");
        let loaded = Config::load(file.path());
        std::env::remove_var("OPSMON_DATA__SOURCE_COL");
        std::env::remove_var("OPSMON_METRICS__REVENUE__BASELINE_DAYS");

        let cfg = loaded.unwrap();
        assert_eq!(cfg.columns.source, "origin");
        assert_eq!(cfg.columns.value, "reading");
        assert_eq!(cfg.metric("revenue").unwrap().baseline_days, 9);
        assert_eq!(cfg.metric("revenue").unwrap().recent_days, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/opsmon.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_with_metric() {
        let cfg = Config::default().with_metric(MetricConfig::new("clicks"));
        assert!(cfg.metric("clicks").is_some());
    }
}
