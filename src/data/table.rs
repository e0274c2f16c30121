//! The materialized observation table and its (source, metric) grouping.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

use opsmon_types::Observation;

/// Grouping key for a series: one data source reporting one metric.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub source: String,
    pub metric: String,
}

impl GroupKey {
    pub fn new(source: impl Into<String>, metric: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            metric: metric.into(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.metric)
    }
}

/// A (timestamp, value) row within a group. NaN readings are stored as `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

impl Point {
    pub fn new(timestamp: NaiveDateTime, value: Option<f64>) -> Self {
        Self {
            timestamp,
            value: value.filter(|v| !v.is_nan()),
        }
    }
}

impl From<&Observation> for Point {
    fn from(obs: &Observation) -> Self {
        Point::new(obs.timestamp, obs.value)
    }
}

/// A fully materialized set of observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Observation>,
}

impl Table {
    /// Create a table from loaded rows.
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, in load order.
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Append a row.
    pub fn push(&mut self, row: Observation) {
        self.rows.push(row);
    }

    /// Group rows by (source, metric) in a single pass.
    ///
    /// Each group is sorted by timestamp; rows sharing a timestamp keep their
    /// load order. Keys iterate in sorted order, so downstream output is
    /// deterministic.
    pub fn groups(&self) -> BTreeMap<GroupKey, Vec<Point>> {
        let mut groups: BTreeMap<GroupKey, Vec<Point>> = BTreeMap::new();

        for row in &self.rows {
            groups
                .entry(GroupKey::new(row.source.as_str(), row.metric.as_str()))
                .or_default()
                .push(Point::from(row));
        }

        for points in groups.values_mut() {
            points.sort_by_key(|p| p.timestamp);
        }

        groups
    }
}

impl FromIterator<Observation> for Table {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_groups_split_by_source_and_metric() {
        let table: Table = vec![
            Observation::new(day(2), "beta", "clicks", Some(2.0)),
            Observation::new(day(1), "alpha", "clicks", Some(1.0)),
            Observation::new(day(1), "alpha", "revenue", Some(10.0)),
            Observation::new(day(3), "alpha", "clicks", None),
        ]
        .into_iter()
        .collect();

        let groups = table.groups();
        let keys: Vec<String> = groups.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["alpha/clicks", "alpha/revenue", "beta/clicks"]);
        assert_eq!(groups[&GroupKey::new("alpha", "clicks")].len(), 2);
    }

    #[test]
    fn test_groups_sorted_by_timestamp_stably() {
        let table = Table::new(vec![
            Observation::new(day(3), "a", "m", Some(3.0)),
            Observation::new(day(1), "a", "m", Some(1.0)),
            Observation::new(day(2), "a", "m", Some(20.0)),
            Observation::new(day(2), "a", "m", Some(21.0)),
        ]);

        let groups = table.groups();
        let values: Vec<Option<f64>> = groups[&GroupKey::new("a", "m")]
            .iter()
            .map(|p| p.value)
            .collect();
        assert_eq!(values, vec![Some(1.0), Some(20.0), Some(21.0), Some(3.0)]);
    }

    #[test]
    fn test_nan_becomes_missing() {
        let point = Point::new(day(1), Some(f64::NAN));
        assert_eq!(point.value, None);
    }

    #[test]
    fn test_empty_table_has_no_groups() {
        assert!(Table::default().groups().is_empty());
    }
}
