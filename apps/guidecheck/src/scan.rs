//! Guide-compliance scanner.
//!
//! Single linear pass: discover files, read them, resolve each file's
//! nearest parent context file, then evaluate the checklist rules. Reading
//! and evaluation run in parallel per file; results are ordered by path.
//! Files are never modified.

use crate::checks::{self, READ_ERROR};
use crate::config::ScanOptions;
use crate::discover::{discover, resolve_parent};
use crate::error::ScanError;
use crate::models::{FileReport, Finding, GuideFile, ScanReport};
use crate::utils::display_path;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

enum Loaded {
    Guide(GuideFile),
    Unreadable { rel: String, error: String },
}

/// Scan `root` and return one `FileReport` per discovered guide file.
///
/// Fails only when `root` is not an existing directory or a pattern is
/// invalid. Unreadable files become `read-error` findings.
pub fn run_scan(root: &Path, opts: &ScanOptions) -> Result<ScanReport, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::InvalidRoot(root.to_path_buf()));
    }
    let root = fs::canonicalize(root).map_err(|_| ScanError::InvalidRoot(root.to_path_buf()))?;
    info!("scanning {}", root.display());

    let paths = discover(&root, opts)?;

    let loaded: Vec<Loaded> = paths
        .par_iter()
        .map(|path| {
            let rel = display_path(path, &root);
            match fs::read_to_string(path) {
                Ok(content) => Loaded::Guide(GuideFile::new(path.clone(), rel, content)),
                Err(e) => {
                    warn!(file = %rel, error = %e, "cannot read guide");
                    Loaded::Unreadable {
                        rel,
                        error: e.to_string(),
                    }
                }
            }
        })
        .collect();

    let available: HashSet<PathBuf> = loaded
        .iter()
        .filter_map(|l| match l {
            Loaded::Guide(g) => Some(g.path.clone()),
            Loaded::Unreadable { .. } => None,
        })
        .collect();

    let loaded: Vec<Loaded> = loaded
        .into_iter()
        .map(|l| match l {
            Loaded::Guide(g) => {
                let parent = resolve_parent(&g.path, &root, &opts.context_names, &available);
                Loaded::Guide(g.with_parent(parent))
            }
            other => other,
        })
        .collect();

    let by_path: HashMap<&Path, &GuideFile> = loaded
        .iter()
        .filter_map(|l| match l {
            Loaded::Guide(g) => Some((g.path.as_path(), g)),
            Loaded::Unreadable { .. } => None,
        })
        .collect();

    let mut files: Vec<FileReport> = loaded
        .par_iter()
        .map(|l| match l {
            Loaded::Guide(g) => {
                let parent = g.parent.as_deref().and_then(|p| by_path.get(p).copied());
                debug!(
                    "checking {} (parent: {})",
                    g.display,
                    parent.map_or("none", |p| p.display.as_str())
                );
                FileReport {
                    file: g.display.clone(),
                    parent: parent.map(|p| p.display.clone()),
                    lines: Some(g.lines),
                    findings: checks::run_checks(g, parent, opts),
                }
            }
            Loaded::Unreadable { rel, error } => FileReport {
                file: rel.clone(),
                parent: None,
                lines: None,
                findings: vec![Finding::fail(
                    rel,
                    READ_ERROR,
                    format!("cannot read file: {}", error),
                )],
            },
        })
        .collect();
    // Deterministic ordering by display path
    files.sort_by(|a, b| a.file.cmp(&b.file));

    let report = ScanReport::new(files);
    info!(
        "scan complete: {} files, {} failed findings",
        report.summary.files, report.summary.failed
    );
    Ok(report)
}
