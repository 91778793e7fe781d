//! Rendering of catalog sweep reports for the terminal, Markdown documents
//! and machine consumers.

use std::fmt::Write;
use std::str::FromStr;

use crate::error::{QaError, QaResult};
use crate::sweep::{SweepReport, SweepStats};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ISSUE_MARKER: &str = "⚠️ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Console,
    Markdown,
    Json,
}

impl FromStr for ReportFormat {
    type Err = QaError;

    fn from_str(s: &str) -> QaResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "console" => Ok(ReportFormat::Console),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(QaError::Parse(format!(
                "Unknown report format '{}', expected console, markdown or json",
                other
            ))),
        }
    }
}

/// Render `report` in the requested format.
pub fn render_report(report: &SweepReport, format: ReportFormat) -> QaResult<String> {
    match format {
        ReportFormat::Console => Ok(render_console(report)),
        ReportFormat::Markdown => Ok(render_markdown(report)),
        ReportFormat::Json => render_json(report),
    }
}

pub fn render_console(report: &SweepReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "=== Localization Test Report ({}) ===",
        report.timestamp.format(TIMESTAMP_FORMAT)
    );
    out.push('\n');
    out.push_str("Statistics:\n");
    for (key, value) in stat_lines(&report.stats) {
        let _ = writeln!(out, "  {}: {}", key, value);
    }

    for (category, issues) in report.issues.categories() {
        if issues.is_empty() {
            continue;
        }
        let _ = write!(out, "\n{}:\n", category_title(category));
        for issue in issues {
            let _ = writeln!(out, "  {} {}", ISSUE_MARKER, issue);
        }
    }
    out
}

pub fn render_markdown(report: &SweepReport) -> String {
    let mut out = String::new();
    out.push_str("# Localization QA Report\n");
    let _ = writeln!(
        out,
        "Generated: {}\n",
        report.timestamp.format(TIMESTAMP_FORMAT)
    );
    out.push_str("## Summary\n");
    for (key, value) in stat_lines(&report.stats) {
        let _ = writeln!(out, "- **{}**: {}", key, value);
    }

    out.push_str("\n## Issues by Category\n\n");
    for (category, issues) in report.issues.categories() {
        if issues.is_empty() {
            continue;
        }
        let _ = writeln!(out, "### {}", category_title(category));
        for issue in issues {
            let _ = writeln!(out, "- {} {}", ISSUE_MARKER, issue);
        }
        out.push('\n');
    }
    out
}

pub fn render_json(report: &SweepReport) -> QaResult<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| QaError::Serialization(format!("Failed to serialize sweep report: {}", e)))
}

fn stat_lines(stats: &SweepStats) -> [(&'static str, String); 4] {
    [
        ("total_strings", stats.total_strings.to_string()),
        ("languages", stats.languages.join(", ")),
        ("missing_translations", stats.missing_translations.to_string()),
        ("issues_found", stats.issues_found.to_string()),
    ]
}

/// `format_issues` -> `Format Issues`
fn category_title(category: &str) -> String {
    category
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
