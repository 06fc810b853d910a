//! Guide file discovery and parent resolution.
//!
//! Candidates come from glob patterns joined onto the scan root. Exclusion
//! patterns are matched against the root-relative path. The nearest parent
//! of a guide is the closest context file (e.g. `AGENTS.md`) in its own
//! directory or above, bounded by the root.

use crate::config::ScanOptions;
use crate::error::ScanError;
use crate::utils::display_path;
use glob::{glob, Pattern};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

fn compile_excludes(exclude: &[String]) -> Result<Vec<Pattern>, ScanError> {
    exclude
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| ScanError::Pattern {
                pattern: p.clone(),
                source: e,
            })
        })
        .collect()
}

/// Reject patterns that could reach outside the root: absolute ones and
/// any with a `..` component.
fn check_pattern(pat: &str) -> Result<(), ScanError> {
    let escapes = Path::new(pat).is_absolute()
        || pat.starts_with('/')
        || pat.split(['/', '\\']).any(|c| c == "..");
    if escapes {
        return Err(ScanError::PatternOutsideRoot(pat.to_string()));
    }
    Ok(())
}

/// Find guide files under `root`, deduplicated and sorted by path.
///
/// `root` must already be canonical. Every match is canonicalized, so a
/// file reached through several symlinked directories is reported once,
/// under its real location. Matches resolving outside `root` are dropped.
pub fn discover(root: &Path, opts: &ScanOptions) -> Result<Vec<PathBuf>, ScanError> {
    let excludes = compile_excludes(&opts.exclude)?;
    for pat in &opts.patterns {
        check_pattern(pat)?;
    }
    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();

    for pat in &opts.patterns {
        let full = format!("{}/{}", escaped_root.trim_end_matches('/'), pat);
        let entries = glob(&full).map_err(|e| ScanError::Pattern {
            pattern: pat.clone(),
            source: e,
        })?;
        for entry in entries {
            let path = match entry {
                Ok(p) => p,
                Err(e) => {
                    warn!("skipping unreadable path during discovery: {}", e);
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            let real = match fs::canonicalize(&path) {
                Ok(p) => p,
                Err(e) => {
                    warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            if !real.starts_with(root) {
                debug!("outside root: {}", path.display());
                continue;
            }
            let rel = display_path(&path, root);
            let real_rel = display_path(&real, root);
            if excludes.iter().any(|x| x.matches(&rel) || x.matches(&real_rel)) {
                debug!("excluded {}", rel);
                continue;
            }
            found.insert(real);
        }
    }
    debug!("discovered {} guide files", found.len());
    Ok(found.into_iter().collect())
}

/// True when the file name is one of the configured context names.
pub fn is_context_file(path: &Path, context_names: &[String]) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| context_names.iter().any(|c| c == n))
}

/// Resolve the nearest parent context file for `file`.
///
/// Context files start looking one directory up; loose guides start in
/// their own directory. Only paths in `available` are eligible, and the
/// walk never leaves `root`.
pub fn resolve_parent(
    file: &Path,
    root: &Path,
    context_names: &[String],
    available: &HashSet<PathBuf>,
) -> Option<PathBuf> {
    let mut dir = file.parent()?;
    if is_context_file(file, context_names) {
        if dir == root {
            return None;
        }
        dir = dir.parent()?;
    }
    loop {
        if !dir.starts_with(root) {
            return None;
        }
        for name in context_names {
            let cand = dir.join(name);
            if cand != file && available.contains(&cand) {
                return Some(cand);
            }
        }
        if dir == root {
            return None;
        }
        dir = dir.parent()?;
    }
}
