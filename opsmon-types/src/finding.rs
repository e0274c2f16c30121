//! Findings - individual detected anomalies.

use core::fmt;

/// The kind of check that produced a finding.
///
/// Variants are declared in evaluation order, which is also the order
/// findings appear on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CheckCode {
    /// Values outside the configured min/max.
    Range,
    /// Gaps between rows or null values.
    Missing,
    /// Distribution shift between baseline and recent windows.
    Shift,
    /// Mean drift between baseline and recent windows.
    Drift,
    /// Duplicate timestamps or monotonicity violations.
    Integrity,
}

impl CheckCode {
    /// All codes, in evaluation order.
    pub const ALL: [CheckCode; 5] = [
        CheckCode::Range,
        CheckCode::Missing,
        CheckCode::Shift,
        CheckCode::Drift,
        CheckCode::Integrity,
    ];

    /// The wire name of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckCode::Range => "range",
            CheckCode::Missing => "missing",
            CheckCode::Shift => "shift",
            CheckCode::Drift => "drift",
            CheckCode::Integrity => "integrity",
        }
    }

    /// Parse a wire name back into a code.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == name)
    }
}

impl fmt::Display for CheckCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// The wire name of this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Upper-case label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected anomaly of a specific kind and severity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finding {
    pub code: CheckCode,
    pub severity: Severity,
    /// Human-readable description, e.g. "Range violations rate 7.00%".
    pub detail: String,
}

impl Finding {
    /// Create a new finding.
    pub fn new(code: CheckCode, severity: Severity, detail: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_names_roundtrip() {
        for code in CheckCode::ALL {
            assert_eq!(CheckCode::parse(code.as_str()), Some(code));
        }
        assert_eq!(CheckCode::parse("latency"), None);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_finding_serializes_lowercase() {
        let finding = Finding::new(CheckCode::Integrity, Severity::High, "Duplicates 5");
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "integrity", "severity": "high", "detail": "Duplicates 5"})
        );
    }
}
