//! Report output.
//!
//! A finished [`Report`] is written twice into the output directory:
//!
//! - `report.json`: the pretty-printed serialized report
//! - `report.html`: a standalone page with one card per (source, metric)

mod html;
mod theme;

use std::fs;
use std::path::{Path, PathBuf};

use opsmon_types::Report;
use tracing::info;

use crate::error::{Error, Result};

pub use html::render_html;
pub use theme::{ScoreBand, Theme};

/// File name of the JSON report.
pub const JSON_FILE: &str = "report.json";
/// File name of the HTML report.
pub const HTML_FILE: &str = "report.html";

/// Locations of the files written by [`write_reports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub html: PathBuf,
}

/// Serialize a report as pretty JSON.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write `report.json` and `report.html` into `outdir`, creating it if needed.
pub fn write_reports(report: &Report, outdir: &Path) -> Result<ReportPaths> {
    fs::create_dir_all(outdir).map_err(|e| Error::io(outdir, e))?;

    let json_path = outdir.join(JSON_FILE);
    let json = to_json(report)?;
    fs::write(&json_path, json).map_err(|e| Error::io(&json_path, e))?;

    let html_path = outdir.join(HTML_FILE);
    let html = render_html(report, &Theme::default());
    fs::write(&html_path, html).map_err(|e| Error::io(&html_path, e))?;

    info!(
        cards = report.len(),
        outdir = %outdir.display(),
        "Reports written"
    );

    Ok(ReportPaths {
        json: json_path,
        html: html_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsmon_types::{Card, CheckCode, Finding, Severity};
    use tempfile::TempDir;

    fn sample_report() -> Report {
        Report::builder()
            .card(
                Card::builder("beta", "revenue")
                    .score(85.6)
                    .finding(Finding::new(
                        CheckCode::Shift,
                        Severity::High,
                        "Distribution shift (KS p=0.0082, PSI=13.816)",
                    ))
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_write_reports_creates_both_files() {
        let dir = TempDir::new().unwrap();
        let outdir = dir.path().join("nested").join("out");

        let paths = write_reports(&sample_report(), &outdir).unwrap();

        assert_eq!(paths.json, outdir.join("report.json"));
        assert_eq!(paths.html, outdir.join("report.html"));
        assert!(paths.json.exists());
        assert!(paths.html.exists());
    }

    #[test]
    fn test_json_report_roundtrips() {
        let dir = TempDir::new().unwrap();
        let report = sample_report();

        let paths = write_reports(&report, dir.path()).unwrap();
        let content = fs::read_to_string(&paths.json).unwrap();
        let parsed: Report = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed.len(), report.len());
        assert_eq!(parsed.cards[0].findings, report.cards[0].findings);
        assert!((parsed.cards[0].score - 85.6).abs() < 1e-9);
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["summary"]["cards"], 1);
        assert_eq!(value["cards"][0]["findings"][0]["code"], "shift");
        assert_eq!(value["cards"][0]["findings"][0]["severity"], "high");
    }

    #[test]
    fn test_empty_report() {
        let dir = TempDir::new().unwrap();
        let paths = write_reports(&Report::default(), dir.path()).unwrap();

        let html = fs::read_to_string(&paths.html).unwrap();
        assert!(html.contains("Cards: 0 · Avg Score: 0"));
    }

    #[test]
    fn test_unwritable_outdir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = write_reports(&sample_report(), &blocker.join("out")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
