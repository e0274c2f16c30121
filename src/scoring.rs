//! Reliability scoring.
//!
//! A card starts at 100 and loses `base_penalty(severity) * weight(code)`
//! per finding. Penalties are additive, so order does not matter, and the
//! result is rounded to two decimals and floored at zero.

use std::collections::BTreeMap;

use opsmon_types::{round2, CheckCode, Finding, Severity};

/// Score of a card with no findings.
pub const MAX_SCORE: f64 = 100.0;

/// Weight applied to a code with no configured weight.
pub const FALLBACK_WEIGHT: f64 = 2.0;

/// Points deducted per finding before weighting.
pub fn base_penalty(severity: Severity) -> f64 {
    match severity {
        Severity::High => 12.0,
        Severity::Medium => 6.0,
        Severity::Low => 3.0,
    }
}

/// Per-check penalty multipliers.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    weights: BTreeMap<CheckCode, f64>,
}

impl Default for Weights {
    fn default() -> Self {
        Self::empty()
            .with(CheckCode::Range, 1.0)
            .with(CheckCode::Missing, 1.0)
            .with(CheckCode::Shift, 1.2)
            .with(CheckCode::Drift, 1.2)
            .with(CheckCode::Integrity, 0.8)
    }
}

impl Weights {
    /// No configured weights; every code uses [`FALLBACK_WEIGHT`].
    pub fn empty() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// Set the weight for a code.
    pub fn with(mut self, code: CheckCode, weight: f64) -> Self {
        self.weights.insert(code, weight);
        self
    }

    /// Overlay another set of weights on top of this one.
    pub fn merge(mut self, overrides: &Weights) -> Self {
        self.weights.extend(overrides.weights.iter().map(|(c, w)| (*c, *w)));
        self
    }

    /// The weight for a code, falling back to [`FALLBACK_WEIGHT`] when unset.
    pub fn weight(&self, code: CheckCode) -> f64 {
        self.weights.get(&code).copied().unwrap_or(FALLBACK_WEIGHT)
    }

    /// Penalty for a single finding.
    pub fn penalty(&self, finding: &Finding) -> f64 {
        base_penalty(finding.severity) * self.weight(finding.code)
    }
}

/// Score a card's findings. Always in [0, 100].
pub fn score_findings(findings: &[Finding], weights: &Weights) -> f64 {
    let penalty: f64 = findings.iter().map(|f| weights.penalty(f)).sum();
    round2(MAX_SCORE - penalty).max(0.0)
}
