//! Version stamp written into every `report.json`.

use std::fmt;

use crate::SCHEMA_VERSION;

/// Layout version of a serialized [`Report`](crate::Report).
///
/// Readers accept any report with their own `major`; a newer `minor` only
/// adds fields they can ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// The layout this crate writes.
    pub const fn current() -> Self {
        Self::new(SCHEMA_VERSION, 0)
    }

    /// True when a report stamped with this version can be read by this crate.
    pub fn is_readable(&self) -> bool {
        self.major == SCHEMA_VERSION
    }

    /// Parse a `major.minor` string such as `"1.0"`.
    pub fn parse(text: &str) -> Option<Self> {
        let (major, minor) = text.trim().split_once('.')?;
        Some(Self::new(major.parse().ok()?, minor.parse().ok()?))
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable_reports() {
        assert!(SchemaVersion::current().is_readable());
        assert!(SchemaVersion::new(SCHEMA_VERSION, 3).is_readable());
        assert!(!SchemaVersion::new(SCHEMA_VERSION + 1, 0).is_readable());
    }

    #[test]
    fn test_display_and_parse() {
        let version = SchemaVersion::new(1, 2);
        assert_eq!(version.to_string(), "1.2");
        assert_eq!(SchemaVersion::parse(" 1.2 "), Some(version));
        assert_eq!(SchemaVersion::parse("1"), None);
        assert_eq!(SchemaVersion::parse("one.two"), None);
    }

    #[test]
    fn test_newer_minor_orders_after_current() {
        assert!(SchemaVersion::new(SCHEMA_VERSION, 1) > SchemaVersion::current());
    }
}
