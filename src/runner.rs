//! The monitoring runner.
//!
//! A run is a pure function of the table and the configuration:
//!
//! ```text
//! Table ──▶ groups() ──▶ for each (source, metric) with a MetricConfig:
//!                          split_windows ──▶ range / missing / shift / drift / integrity
//!                                         ──▶ SeverityPolicy ──▶ score_findings ──▶ Card
//!       ──▶ Report { summary, cards }
//! ```
//!
//! Groups are visited in (source, metric) order, so identical input always
//! produces an identical report.

use tracing::{debug, info, warn};

use opsmon_types::{Card, CardStats, MetricConfig, Report};

use crate::checks::{distribution_shift, integrity_check, missingness_check, range_check};
use crate::config::Config;
use crate::data::{GroupKey, Point, Table};
use crate::error::Result;
use crate::findings::SeverityPolicy;
use crate::scoring::{score_findings, Weights};
use crate::source::ObservationSource;
use crate::window::split_windows;

/// Guards the relative change against a zero baseline mean.
const DENOMINATOR_EPSILON: f64 = 1e-9;

/// Run every check over every configured group using the default severity policy.
pub fn run_monitoring(table: &Table, config: &Config) -> Report {
    run_with_policy(table, config, &SeverityPolicy::default())
}

/// Run every check over every configured group.
///
/// Groups whose metric has no configuration are skipped silently.
pub fn run_with_policy(table: &Table, config: &Config, policy: &SeverityPolicy) -> Report {
    let mut cards = Vec::new();
    let mut skipped = 0usize;

    for (key, points) in table.groups() {
        let Some(metric) = config.metric(&key.metric) else {
            debug!(group = %key, "metric not configured, skipping");
            skipped += 1;
            continue;
        };
        cards.push(evaluate_group(&key, &points, metric, &config.weights, policy));
    }

    let report = Report::builder().cards(cards).build();
    info!(
        cards = report.summary.cards,
        avg_score = report.summary.avg_score,
        skipped,
        "monitoring run complete"
    );
    report
}

/// Load a table from `source` and run it.
pub fn monitor_source(source: &mut dyn ObservationSource, config: &Config) -> Result<Report> {
    let table = source.load(&config.columns)?;
    info!(rows = table.len(), source = source.description(), "running checks");
    Ok(run_monitoring(&table, config))
}

/// Change in mean between the baseline and recent windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftStats {
    /// `mean(recent) - mean(baseline)`.
    pub delta: f64,
    /// `|delta| / (|mean(baseline)| + 1e-9)`.
    pub relative: f64,
}

/// Compare window means. Returns `None` unless both windows have values.
fn mean_drift(baseline: &[f64], recent: &[f64]) -> Option<DriftStats> {
    let baseline_mean = mean(baseline)?;
    let recent_mean = mean(recent)?;
    let delta = recent_mean - baseline_mean;

    Some(DriftStats {
        delta,
        relative: delta.abs() / (baseline_mean.abs() + DENOMINATOR_EPSILON),
    })
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Build the card for one group.
///
/// Checks run in a fixed order (range, missing, shift, drift, integrity) and
/// each contributes at most one finding.
pub fn evaluate_group(
    key: &GroupKey,
    points: &[Point],
    metric: &MetricConfig,
    weights: &Weights,
    policy: &SeverityPolicy,
) -> Card {
    let windows = split_windows(points, metric.baseline_days, metric.recent_days);
    let baseline = windows.baseline_values();
    let recent = windows.recent_values();
    if baseline.is_empty() || recent.is_empty() {
        warn!(
            group = %key,
            baseline = baseline.len(),
            recent = recent.len(),
            "empty window, shift and drift checks have no evidence"
        );
    }

    let values: Vec<Option<f64>> = points.iter().map(|p| p.value).collect();
    let range = range_check(&values, &metric.range);
    let missingness = missingness_check(points, metric.max_gap_minutes);
    let shift = distribution_shift(&baseline, &recent, metric.ks_alpha, metric.psi_bins);
    let drift = mean_drift(&baseline, &recent);
    let integrity = integrity_check(points, metric.monotonic);

    let findings: Vec<_> = [
        policy.range(&range),
        policy.missing(&missingness, metric.missingness_threshold),
        policy.shift(&shift),
        drift.and_then(|d| policy.drift(&d)),
        policy.integrity(&integrity),
    ]
    .into_iter()
    .flatten()
    .collect();

    let score = score_findings(&findings, weights);
    debug!(group = %key, rows = points.len(), score, findings = findings.len(), "evaluated group");

    Card::builder(key.source.as_str(), key.metric.as_str())
        .score(score)
        .findings(findings)
        .stats(CardStats {
            range,
            missingness,
            shift,
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use opsmon_types::{CheckCode, Observation, Severity};

    use crate::source::MemorySource;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn daily(source: &str, metric: &str, values: &[f64]) -> Vec<Observation> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Observation::new(start() + Duration::days(i as i64), source, metric, Some(*v)))
            .collect()
    }

    fn codes(card: &Card) -> Vec<CheckCode> {
        card.findings.iter().map(|f| f.code).collect()
    }

    fn daily_config(metric: &str) -> MetricConfig {
        MetricConfig::builder(metric).max_gap_minutes(1440.0).build()
    }

    #[test]
    fn test_ten_increasing_daily_rows() {
        let values: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let table = Table::new(daily("alpha", "revenue", &values));
        let config = Config::default().with_metric(
            MetricConfig::builder("revenue")
                .min(0.0)
                .max(10_000.0)
                .baseline_days(5)
                .recent_days(3)
                .psi_bins(5)
                .max_gap_minutes(1440.0)
                .build(),
        );

        let report = run_monitoring(&table, &config);
        assert_eq!(report.summary.cards, 1);
        assert_eq!(report.cards.len(), 1);

        // Baseline 101..=105 and recent 106..=109 do not overlap at all, so the
        // windows look like different distributions even though the series is
        // a clean ramp. Nothing else fires.
        let card = &report.cards[0];
        assert_eq!(codes(card), vec![CheckCode::Shift]);
        assert_eq!(card.findings[0].severity, Severity::High);
        assert_eq!(card.score, 85.6);
        assert_eq!(card.stats.range.violations, 0);
        assert_eq!(card.stats.missingness.missing_rate, 0.0);
        assert_eq!(card.stats.missingness.max_gap_minutes, 1440.0);
    }

    #[test]
    fn test_stable_hourly_series_scores_100() {
        // 40 days of hourly readings with an identical daily cycle.
        let rows: Vec<Observation> = (0..40 * 24)
            .map(|h| {
                Observation::new(
                    start() + Duration::hours(h),
                    "alpha",
                    "latency",
                    Some(100.0 + (h % 24) as f64),
                )
            })
            .collect();
        let config = Config::default().with_metric(
            MetricConfig::builder("latency").min(0.0).max(1000.0).build(),
        );

        let report = run_monitoring(&Table::new(rows), &config);
        let card = &report.cards[0];
        assert!(card.is_clean(), "unexpected findings: {:?}", card.findings);
        assert_eq!(card.score, 100.0);
        assert!(!card.stats.shift.ks_shift);
        assert!(card.stats.shift.psi < 0.01);
        assert_eq!(report.summary.avg_score, 100.0);
    }

    #[test]
    fn test_level_jump_reports_drift_and_shift() {
        let mut values: Vec<f64> = (0..120).map(|i| 100.0 + (i % 5) as f64).collect();
        for v in values.iter_mut().skip(110) {
            *v *= 1.5;
        }
        let table = Table::new(daily("beta", "revenue", &values));
        let config = Config::default().with_metric(daily_config("revenue"));

        let report = run_monitoring(&table, &config);
        let card = report.card("beta", "revenue").unwrap();

        assert_eq!(codes(card), vec![CheckCode::Shift, CheckCode::Drift]);
        assert!(card.findings.iter().all(|f| f.severity == Severity::High));
        assert_eq!(card.score, 71.2);
    }

    #[test]
    fn test_moderate_jump_is_medium_drift() {
        let mut values: Vec<f64> = (0..120).map(|i| 100.0 + (i % 5) as f64).collect();
        for v in values.iter_mut().skip(110) {
            *v *= 1.2;
        }
        let table = Table::new(daily("beta", "revenue", &values));
        let config = Config::default().with_metric(daily_config("revenue"));

        let card = &run_monitoring(&table, &config).cards[0];
        let drift = card.findings.iter().find(|f| f.code == CheckCode::Drift).unwrap();
        assert_eq!(drift.severity, Severity::Medium);
    }

    #[test]
    fn test_unconfigured_metric_is_skipped() {
        let mut rows = daily("alpha", "revenue", &[1.0, 2.0, 3.0]);
        rows.extend(daily("alpha", "clicks", &[0.0, 0.0, 0.0]));
        let config = Config::default().with_metric(daily_config("revenue"));

        let report = run_monitoring(&Table::new(rows), &config);
        assert_eq!(report.summary.cards, 1);
        assert!(report.card("alpha", "clicks").is_none());
    }

    #[test]
    fn test_nothing_configured_gives_empty_report() {
        let table = Table::new(daily("alpha", "revenue", &[1.0, 2.0]));
        let report = run_monitoring(&table, &Config::default());
        assert!(report.is_empty());
        assert_eq!(report.summary.avg_score, 0.0);
    }

    #[test]
    fn test_one_card_per_group_in_sorted_order() {
        let mut rows = daily("gamma", "revenue", &[1.0, 1.0]);
        rows.extend(daily("alpha", "revenue", &[1.0, 1.0]));
        rows.extend(daily("beta", "revenue", &[1.0, 1.0]));
        rows.extend(daily("alpha", "revenue", &[1.0]));
        let config = Config::default().with_metric(daily_config("revenue"));

        let report = run_monitoring(&Table::new(rows), &config);
        let sources: Vec<&str> = report.cards.iter().map(|c| c.source.as_str()).collect();
        assert_eq!(sources, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_findings_follow_check_order_and_are_unique() {
        // Out-of-range values, duplicate timestamps, gaps and a level change.
        let mut rows = daily("alpha", "orders", &[10.0; 40]);
        for row in rows.iter_mut().skip(35) {
            row.value = Some(500.0);
        }
        rows.retain(|r| r.timestamp != start() + Duration::days(20));
        let dup = rows[0].clone();
        rows.push(dup);

        let config = Config::default().with_metric(
            MetricConfig::builder("orders")
                .max(100.0)
                .max_gap_minutes(1440.0)
                .missingness_threshold(0.0)
                .build(),
        );

        let card = &run_monitoring(&Table::new(rows), &config).cards[0];
        assert_eq!(
            codes(card),
            vec![
                CheckCode::Range,
                CheckCode::Missing,
                CheckCode::Shift,
                CheckCode::Drift,
                CheckCode::Integrity,
            ]
        );
        assert!(card.score < 100.0);
    }

    #[test]
    fn test_single_row_group() {
        let table = Table::new(daily("alpha", "revenue", &[5.0]));
        let config = Config::default().with_metric(daily_config("revenue"));

        let card = &run_monitoring(&table, &config).cards[0];
        assert!(card.is_clean());
        assert_eq!(card.score, 100.0);
        assert_eq!(card.stats.shift, opsmon_types::ShiftStats::no_evidence());
    }

    #[test]
    fn test_all_null_group() {
        let rows: Vec<Observation> = (0..10)
            .map(|i| Observation::new(start() + Duration::days(i), "alpha", "revenue", None))
            .collect();
        let config = Config::default().with_metric(daily_config("revenue"));

        let card = &run_monitoring(&Table::new(rows), &config).cards[0];
        assert_eq!(codes(card), vec![CheckCode::Missing]);
        assert_eq!(card.stats.missingness.nan_rate, 1.0);
        assert_eq!(card.score, 88.0);
    }

    #[test]
    fn test_monitor_source() {
        let mut source = MemorySource::new(daily("alpha", "revenue", &[1.0, 1.0, 1.0]));
        let config = Config::default().with_metric(daily_config("revenue"));
        let report = monitor_source(&mut source, &config).unwrap();
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let values: Vec<f64> = (0..60).map(|i| ((i * 7919) % 13) as f64).collect();
        let mut rows = daily("alpha", "revenue", &values);
        rows.extend(daily("beta", "revenue", &values));
        let table = Table::new(rows);
        let config = Config::default().with_metric(daily_config("revenue"));

        assert_eq!(run_monitoring(&table, &config), run_monitoring(&table, &config));
    }

    #[test]
    fn test_oversized_baseline_window_still_reports() {
        let values: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let table = Table::new(daily("alpha", "revenue", &values));
        let config = Config::from_toml_str(
            "[metrics.revenue]\nbaseline_days = 100000000\nmax_gap_minutes = 1440\n",
        )
        .unwrap();

        let report = run_monitoring(&table, &config);
        assert_eq!(report.len(), 1);
        assert_eq!(report.cards[0].stats.range.violations, 0);
    }

    #[test]
    fn test_drift_requires_both_windows() {
        assert_eq!(mean_drift(&[], &[1.0]), None);
        assert_eq!(mean_drift(&[1.0], &[]), None);
    }

    #[test]
    fn test_drift_relative_change() {
        let drift = mean_drift(&[100.0, 100.0], &[150.0, 150.0]).unwrap();
        assert_eq!(drift.delta, 50.0);
        assert!((drift.relative - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_drift_zero_baseline_mean_stays_finite() {
        let drift = mean_drift(&[-1.0, 1.0], &[0.5]).unwrap();
        assert!(drift.relative.is_finite());
        assert!(drift.relative > 1e6);

        let flat = mean_drift(&[0.0], &[0.0]).unwrap();
        assert_eq!(flat.relative, 0.0);
    }
}
