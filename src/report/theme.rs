//! Score bands and their colors.

/// Health band for a reliability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoreBand {
    Healthy,
    Warning,
    Critical,
}

impl ScoreBand {
    /// Score at or above which a card is healthy.
    pub const HEALTHY_MIN: f64 = 85.0;
    /// Score at or above which a card is only a warning.
    pub const WARNING_MIN: f64 = 70.0;

    /// Classify a score.
    pub fn from_score(score: f64) -> Self {
        if score >= Self::HEALTHY_MIN {
            ScoreBand::Healthy
        } else if score >= Self::WARNING_MIN {
            ScoreBand::Warning
        } else {
            ScoreBand::Critical
        }
    }
}

/// Colors used by the HTML report.
#[derive(Debug, Clone)]
pub struct Theme {
    pub healthy: &'static str,
    pub warning: &'static str,
    pub critical: &'static str,
    pub background: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            healthy: "#1d9f74",
            warning: "#f1b11b",
            critical: "#d94d4d",
            background: "#f6f1ea",
        }
    }
}

impl Theme {
    /// Color for a score band.
    pub fn band_color(&self, band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Healthy => self.healthy,
            ScoreBand::Warning => self.warning,
            ScoreBand::Critical => self.critical,
        }
    }
}
