//! Output rendering for scan reports.
//!
//! Supports `human` (default) and `json` outputs. The JSON form carries the
//! per-file groups and a top-level summary.

use crate::config::OutputMode;
use crate::models::{Finding, ScanReport, Status};
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;

/// Print a scan report in the requested format.
pub fn print_report(report: &ScanReport, output: OutputMode, failures_only: bool) {
    match output {
        OutputMode::Json => match serde_json::to_string_pretty(report) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} failed to encode report: {}", crate::utils::error_prefix(), e),
        },
        OutputMode::Human => {
            print!("{}", render_human(report, crate::utils::use_colors(), failures_only));
        }
    }
}

fn render_finding(f: &Finding, color: bool) -> String {
    let (icon, tag) = match f.status {
        Status::Pass => ("✔", "⟦pass⟧"),
        Status::Fail => ("✖", "⟦fail⟧"),
    };
    if !color {
        return format!("{} {} {} ❲{}❳ — {}", icon, tag, f.file, f.rule, f.message);
    }
    let (icon, tag) = match f.status {
        Status::Pass => (icon.green().to_string(), tag.green().bold().to_string()),
        Status::Fail => (icon.red().to_string(), tag.red().bold().to_string()),
    };
    format!("{} {} {} ❲{}❳ — {}", icon, tag, f.file.bold(), f.rule, f.message)
}

/// Render the human report: one line per finding, then a summary line.
pub fn render_human(report: &ScanReport, color: bool, failures_only: bool) -> String {
    let mut out = String::new();
    for f in report.findings() {
        if failures_only && !f.status.is_fail() {
            continue;
        }
        out.push_str(&render_finding(f, color));
        out.push('\n');
    }
    let s = &report.summary;
    let summary = format!(
        "— Summary — files={} findings={} passed={} failed={}",
        s.files, s.findings, s.passed, s.failed
    );
    if color {
        out.push_str(&summary.bold().to_string());
    } else {
        out.push_str(&summary);
    }
    out.push('\n');
    out
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &ScanReport) -> Result<JsonVal, serde_json::Error> {
    serde_json::to_value(report)
}
