//! Shared data models for scan results.

pub mod guide;

use serde::Serialize;
use std::fmt;

pub use guide::GuideFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Outcome of evaluating one rule against one file.
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    pub fn is_fail(self) -> bool {
        self == Status::Fail
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "pass"),
            Status::Fail => write!(f, "fail"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single rule evaluation for one guide file.
pub struct Finding {
    pub file: String,
    pub rule: String,
    pub status: Status,
    pub message: String,
}

impl Finding {
    pub fn pass(file: &str, rule: &str, message: impl Into<String>) -> Self {
        Self {
            file: file.to_string(),
            rule: rule.to_string(),
            status: Status::Pass,
            message: message.into(),
        }
    }

    pub fn fail(file: &str, rule: &str, message: impl Into<String>) -> Self {
        Self {
            file: file.to_string(),
            rule: rule.to_string(),
            status: Status::Fail,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// All findings produced for one discovered file.
pub struct FileReport {
    pub file: String,
    pub parent: Option<String>,
    /// `None` when the file could not be read.
    pub lines: Option<usize>,
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn has_failures(&self) -> bool {
        self.findings.iter().any(|f| f.status.is_fail())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Aggregated counters used by printers and the exit code.
pub struct Summary {
    pub files: usize,
    pub findings: usize,
    pub passed: usize,
    pub failed: usize,
    pub failed_files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Scan results container, one group per file ordered by path.
pub struct ScanReport {
    pub files: Vec<FileReport>,
    pub summary: Summary,
}

impl ScanReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        let mut summary = Summary {
            files: files.len(),
            ..Summary::default()
        };
        for fr in &files {
            for f in &fr.findings {
                summary.findings += 1;
                match f.status {
                    Status::Pass => summary.passed += 1,
                    Status::Fail => summary.failed += 1,
                }
            }
            if fr.has_failures() {
                summary.failed_files += 1;
            }
        }
        Self { files, summary }
    }

    pub fn all_passed(&self) -> bool {
        self.summary.failed == 0
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.files.iter().flat_map(|fr| fr.findings.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_pass_and_fail() {
        let files = vec![
            FileReport {
                file: "AGENTS.md".into(),
                parent: None,
                lines: Some(10),
                findings: vec![
                    Finding::pass("AGENTS.md", "line-count", "ok"),
                    Finding::fail("AGENTS.md", "structure", "missing"),
                ],
            },
            FileReport {
                file: "docs/AGENTS.md".into(),
                parent: Some("AGENTS.md".into()),
                lines: Some(3),
                findings: vec![Finding::pass("docs/AGENTS.md", "line-count", "ok")],
            },
        ];
        let report = ScanReport::new(files);
        assert_eq!(report.summary.files, 2);
        assert_eq!(report.summary.findings, 3);
        assert_eq!(report.summary.passed, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.failed_files, 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_empty_report_passes() {
        let report = ScanReport::new(Vec::new());
        assert!(report.all_passed());
        assert_eq!(report.summary, Summary::default());
    }
}
