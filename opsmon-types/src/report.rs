//! Cards and reports - the output of a monitoring run.

use crate::{round2, CardStats, Finding, SchemaVersion};

/// The reliability summary for one (source, metric) group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub source: String,
    pub metric: String,
    /// Reliability score in [0, 100].
    pub score: f64,
    /// At most one finding per check code, in evaluation order.
    pub findings: Vec<Finding>,
    pub stats: CardStats,
}

impl Card {
    /// Create a builder for a card.
    pub fn builder(source: impl Into<String>, metric: impl Into<String>) -> CardBuilder {
        CardBuilder::new(source, metric)
    }

    /// True when no anomalies were found.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Builder for `Card`.
#[derive(Debug)]
pub struct CardBuilder {
    source: String,
    metric: String,
    score: f64,
    findings: Vec<Finding>,
    stats: CardStats,
}

impl CardBuilder {
    /// Create a new builder. The score starts at 100.
    pub fn new(source: impl Into<String>, metric: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            metric: metric.into(),
            score: 100.0,
            findings: Vec::new(),
            stats: CardStats::default(),
        }
    }

    /// Set the score.
    pub fn score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Append a finding.
    pub fn finding(mut self, finding: Finding) -> Self {
        self.findings.push(finding);
        self
    }

    /// Replace all findings.
    pub fn findings(mut self, findings: Vec<Finding>) -> Self {
        self.findings = findings;
        self
    }

    /// Set the supporting statistics.
    pub fn stats(mut self, stats: CardStats) -> Self {
        self.stats = stats;
        self
    }

    /// Build the card.
    pub fn build(self) -> Card {
        Card {
            source: self.source,
            metric: self.metric,
            score: self.score,
            findings: self.findings,
            stats: self.stats,
        }
    }
}

/// Run-level summary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportSummary {
    /// Number of cards emitted.
    pub cards: usize,
    /// Mean card score rounded to two decimals, 0 when there are no cards.
    pub avg_score: f64,
}

impl ReportSummary {
    /// Summarize a set of cards.
    pub fn from_cards(cards: &[Card]) -> Self {
        if cards.is_empty() {
            return Self::default();
        }
        let total: f64 = cards.iter().map(|c| c.score).sum();
        Self {
            cards: cards.len(),
            avg_score: round2(total / cards.len() as f64),
        }
    }
}

/// The full output of a monitoring run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    /// Schema version for forward compatibility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: SchemaVersion,

    pub summary: ReportSummary,

    pub cards: Vec<Card>,
}

impl Report {
    /// Create a builder for constructing reports.
    pub fn builder() -> ReportBuilder {
        ReportBuilder::new()
    }

    /// Check if the report has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the report.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Find the card for a (source, metric) pair.
    pub fn card(&self, source: &str, metric: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.source == source && c.metric == metric)
    }

    /// Iterate over all cards.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl Default for Report {
    fn default() -> Self {
        Report::builder().build()
    }
}

/// Builder for constructing `Report` instances.
///
/// The summary is derived from the cards when the report is built.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    cards: Vec<Card>,
}

impl ReportBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card.
    pub fn card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    /// Add several cards.
    pub fn cards(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        self.cards.extend(cards);
        self
    }

    /// Build the report.
    pub fn build(self) -> Report {
        Report {
            version: SchemaVersion::current(),
            summary: ReportSummary::from_cards(&self.cards),
            cards: self.cards,
        }
    }
}
