//! HTML rendering of a report as a grid of reliability cards.

use std::fmt::Write;

use opsmon_types::{Card, Report};

use super::theme::{ScoreBand, Theme};

const STYLE: &str = "\
body { font-family: 'Georgia', serif; margin: 0; padding: 24px; }
h1 { margin: 0 0 8px 0; }
.summary { margin-bottom: 16px; color: #444; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 16px; }
.card { background: white; border-radius: 12px; padding: 16px; box-shadow: 0 4px 16px rgba(0,0,0,0.08); }
.card-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px; }
.title { font-weight: bold; }
.score { font-size: 24px; font-weight: bold; }
ul { margin: 0; padding-left: 18px; }
";

/// Render a report as a standalone HTML page.
pub fn render_html(report: &Report, theme: &Theme) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Reliability Cards</title>\n<style>\n");
    let _ = writeln!(html, "body {{ background: {}; }}", theme.background);
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Reliability Cards</h1>\n");
    let _ = writeln!(
        html,
        "<div class=\"summary\">Cards: {} · Avg Score: {}</div>",
        report.summary.cards, report.summary.avg_score
    );
    html.push_str("<div class=\"grid\">\n");
    for card in &report.cards {
        render_card(&mut html, card, theme);
    }
    html.push_str("</div>\n");
    let _ = writeln!(html, "<footer>Report schema {}</footer>", report.version);
    html.push_str("</body>\n</html>\n");

    html
}

fn render_card(html: &mut String, card: &Card, theme: &Theme) {
    let color = theme.band_color(ScoreBand::from_score(card.score));

    html.push_str("<div class=\"card\">\n<div class=\"card-header\">\n");
    let _ = writeln!(
        html,
        "<div class=\"title\">{} · {}</div>",
        escape(&card.source),
        escape(&card.metric)
    );
    let _ = writeln!(
        html,
        "<div class=\"score\" style=\"color:{color}\">{}</div>",
        card.score
    );
    html.push_str("</div>\n<ul>");

    if card.findings.is_empty() {
        html.push_str("<li>No issues detected</li>");
    }
    for finding in &card.findings {
        let _ = write!(
            html,
            "<li><strong>{}</strong> [{}] {}</li>",
            finding.severity.label(),
            finding.code,
            escape(&finding.detail)
        );
    }
    html.push_str("</ul>\n</div>\n");
}

/// Escape text for inclusion in HTML content or attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
