//! Synthetic metric tables with known anomalies.
//!
//! Every (source, metric) pair gets a noisy linear series; three of them are
//! then damaged on purpose so a monitoring run has something to find:
//!
//! | Series               | Damage                                  |
//! |----------------------|-----------------------------------------|
//! | beta / revenue       | last 10 values ×1.5                     |
//! | gamma / clicks       | values 20..25 null, rows 35 and 36 gone |
//! | alpha / active_users | last 3 values ×3                        |

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveTime};
use opsmon_types::Observation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::info;

use crate::data::format_timestamp;
use crate::error::{Error, Result};

pub const SOURCES: [&str; 3] = ["alpha", "beta", "gamma"];
pub const METRICS: [&str; 3] = ["revenue", "clicks", "active_users"];

/// Parameters of a generated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub seed: u64,
    /// Number of daily rows per series, before row removal.
    pub periods: usize,
    pub start: NaiveDate,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            seed: 7,
            periods: 120,
            start: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

fn scale(metric: &str) -> f64 {
    match metric {
        "revenue" => 40.0,
        "clicks" => 250.0,
        "active_users" => 600.0,
        _ => 1.0,
    }
}

/// Generate observations for every source and metric, in source-major order.
pub fn generate_observations(options: &GeneratorOptions) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let periods = options.periods;
    let mut rows = Vec::with_capacity(SOURCES.len() * METRICS.len() * periods);

    for source in SOURCES {
        for metric in METRICS {
            let base: f64 = rng.gen_range(100.0..200.0);
            let trend: f64 = rng.gen_range(-0.2..0.3);
            let noise: f64 = rng.gen_range(5.0..25.0);

            let mut days: Vec<usize> = (0..periods).collect();
            let mut values: Vec<Option<f64>> = (0..periods)
                .map(|i| {
                    let z: f64 = rng.sample(StandardNormal);
                    Some((base + trend * i as f64 + noise * z) * scale(metric))
                })
                .collect();

            inject_anomalies(source, metric, &mut days, &mut values);

            for (day, value) in days.into_iter().zip(values) {
                let timestamp = (options.start + Duration::days(day as i64)).and_time(NaiveTime::MIN);
                rows.push(Observation::new(timestamp, source, metric, value));
            }
        }
    }

    rows
}

/// Apply the known damage for a (source, metric) pair, if any.
fn inject_anomalies(source: &str, metric: &str, days: &mut Vec<usize>, values: &mut Vec<Option<f64>>) {
    match (source, metric) {
        ("beta", "revenue") => scale_tail(values, 10, 1.5),
        ("gamma", "clicks") => {
            for value in values.iter_mut().take(25).skip(20) {
                *value = None;
            }
            for index in [36, 35] {
                if index < days.len() {
                    days.remove(index);
                    values.remove(index);
                }
            }
        }
        ("alpha", "active_users") => scale_tail(values, 3, 3.0),
        _ => {}
    }
}

fn scale_tail(values: &mut [Option<f64>], count: usize, factor: f64) {
    let from = values.len().saturating_sub(count);
    for value in values[from..].iter_mut().flatten() {
        *value *= factor;
    }
}

/// Write observations as a headered CSV. Null values are written as empty fields.
pub fn write_csv<W: Write>(writer: W, rows: &[Observation]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["timestamp", "source", "metric", "value"])?;
    for row in rows {
        let value = row.value.map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record([
            format_timestamp(row.timestamp).as_str(),
            row.source.as_str(),
            row.metric.as_str(),
            value.as_str(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Generate a table and write it to `path`, creating parent directories.
///
/// Returns the number of rows written.
pub fn generate_to_path(path: &Path, options: &GeneratorOptions) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let file = fs::File::create(path).map_err(|e| Error::io(path, e))?;

    let rows = generate_observations(options);
    write_csv(file, &rows)?;
    info!(rows = rows.len(), seed = options.seed, path = %path.display(), "generated sample data");

    Ok(rows.len())
}
