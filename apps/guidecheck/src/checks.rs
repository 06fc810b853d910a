//! Checklist rules evaluated against each guide file.
//!
//! Every rule yields exactly one `Finding` per file it runs on.

use crate::config::ScanOptions;
use crate::markdown;
use crate::models::{Finding, GuideFile};

pub const LINE_COUNT: &str = "line-count";
pub const DUPLICATION: &str = "duplication";
pub const STRUCTURE: &str = "structure";
pub const READ_ERROR: &str = "read-error";

/// All rules: (name, description)
pub const ALL_RULES: &[(&str, &str)] = &[
    (
        LINE_COUNT,
        "Guide must not exceed the configured line ceiling (default 100)",
    ),
    (
        DUPLICATION,
        "No paragraph may repeat verbatim from the nearest parent AGENTS.md",
    ),
    (
        STRUCTURE,
        "Guide needs a top-level header and an actionable section (Commands, Usage, ...)",
    ),
    (
        READ_ERROR,
        "Reported when a guide cannot be read; always enabled",
    ),
];

/// Run every enabled rule for `guide`, in registry order.
pub fn run_checks(
    guide: &GuideFile,
    parent: Option<&GuideFile>,
    opts: &ScanOptions,
) -> Vec<Finding> {
    let mut out = Vec::new();
    if opts.line_count {
        out.push(check_line_count(guide, opts.max_lines));
    }
    if opts.duplication {
        out.push(check_duplication(guide, parent, opts.min_chars));
    }
    if opts.structure {
        out.push(check_structure(guide, &opts.keywords));
    }
    out
}

pub fn check_line_count(guide: &GuideFile, max_lines: usize) -> Finding {
    let msg = format!("{} lines (ceiling {})", guide.lines, max_lines);
    if guide.lines > max_lines {
        Finding::fail(&guide.display, LINE_COUNT, msg)
    } else {
        Finding::pass(&guide.display, LINE_COUNT, msg)
    }
}

/// Fails when a substantial block of `guide` occurs verbatim in `parent`.
///
/// Blocks are compared after per-line trimming and must align on line
/// boundaries in the parent. Lone header lines and blocks shorter than
/// `min_chars` are ignored.
pub fn check_duplication(
    guide: &GuideFile,
    parent: Option<&GuideFile>,
    min_chars: usize,
) -> Finding {
    let Some(parent) = parent else {
        return Finding::pass(&guide.display, DUPLICATION, "no parent guide");
    };
    let haystack = format!("\n{}\n", markdown::normalize(&parent.content));
    let dups: Vec<usize> = markdown::blocks(&guide.content)
        .into_iter()
        .filter(|b| !b.heading_only && b.text.chars().count() >= min_chars)
        .filter(|b| haystack.contains(&format!("\n{}\n", b.text)))
        .map(|b| b.start_line)
        .collect();
    match dups.first() {
        None => Finding::pass(
            &guide.display,
            DUPLICATION,
            format!("no paragraph duplicated from {}", parent.display),
        ),
        Some(first) => Finding::fail(
            &guide.display,
            DUPLICATION,
            format!(
                "{} paragraph(s) duplicated from {} (first at line {})",
                dups.len(),
                parent.display,
                first
            ),
        ),
    }
}

pub fn check_structure(guide: &GuideFile, keywords: &[String]) -> Finding {
    let headers = markdown::headers(&guide.content);
    let has_top = headers.iter().any(|h| h.level == 1);
    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let actionable = headers.iter().find(|h| {
        let t = h.text.to_lowercase();
        lowered.iter().any(|k| !k.is_empty() && t.contains(k.as_str()))
    });
    match (has_top, actionable) {
        (true, Some(h)) => Finding::pass(
            &guide.display,
            STRUCTURE,
            format!("top-level header and actionable section '{}'", h.text),
        ),
        (false, Some(_)) => Finding::fail(&guide.display, STRUCTURE, "missing top-level header"),
        (true, None) => Finding::fail(&guide.display, STRUCTURE, "missing actionable section"),
        (false, None) => Finding::fail(
            &guide.display,
            STRUCTURE,
            "missing top-level header and actionable section",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn guide(name: &str, content: &str) -> GuideFile {
        GuideFile::new(name.into(), name.into(), content.to_string())
    }

    const SHARED: &str = "Always run the full test suite before pushing any change to main.";

    #[test]
    fn test_line_count_ceiling_boundary() {
        let at = guide("a.md", &"x\n".repeat(100));
        assert_eq!(check_line_count(&at, 100).status, Status::Pass);
        let over = guide("b.md", &"x\n".repeat(101));
        let f = check_line_count(&over, 100);
        assert_eq!(f.status, Status::Fail);
        assert_eq!(f.message, "101 lines (ceiling 100)");
    }

    #[test]
    fn test_duplication_detects_and_clears() {
        let parent = guide("AGENTS.md", &format!("# Root\n\n{}\n\n## Commands\n", SHARED));
        let child = guide("docs/AGENTS.md", &format!("# Docs\n\nintro\n\n  {}\n", SHARED));
        let f = check_duplication(&child, Some(&parent), 40);
        assert_eq!(f.status, Status::Fail);
        assert!(f.message.contains("first at line 5"), "{}", f.message);

        let cleaned = guide("docs/AGENTS.md", "# Docs\n\nintro\n");
        assert_eq!(check_duplication(&cleaned, Some(&parent), 40).status, Status::Pass);
    }

    #[test]
    fn test_duplication_requires_line_alignment_and_min_chars() {
        let parent = guide("AGENTS.md", &format!("# Root\n\nPrefix {}\n\n## Commands\n", SHARED));
        let child = guide("x.md", &format!("{}\n\n## Commands\n", SHARED));
        // SHARED is only a suffix of a parent line, and the header is too short
        assert_eq!(check_duplication(&child, Some(&parent), 40).status, Status::Pass);
        // A sub-block of a larger parent paragraph still counts
        let parent = guide("AGENTS.md", &format!("line one of the paragraph\n{}\n", SHARED));
        assert_eq!(check_duplication(&child, Some(&parent), 40).status, Status::Fail);
        // Raising the threshold above the block length disables the match
        assert_eq!(check_duplication(&child, Some(&parent), 500).status, Status::Pass);
    }

    #[test]
    fn test_duplication_without_parent_passes() {
        let f = check_duplication(&guide("AGENTS.md", SHARED), None, 40);
        assert_eq!(f.status, Status::Pass);
        assert_eq!(f.message, "no parent guide");
    }

    #[test]
    fn test_structure_variants() {
        let kw: Vec<String> = vec!["commands".into(), "usage".into()];
        let ok = guide("a.md", "# Guide\n\n## Build Commands\n\n- cargo test\n");
        assert_eq!(check_structure(&ok, &kw).status, Status::Pass);

        let no_top = guide("b.md", "## Usage\n");
        assert_eq!(check_structure(&no_top, &kw).message, "missing top-level header");

        let no_section = guide("c.md", "# Guide\n\n## Style\n");
        assert_eq!(check_structure(&no_section, &kw).message, "missing actionable section");

        let fenced = guide("d.md", "```\n# Guide\n## Commands\n```\n");
        assert_eq!(
            check_structure(&fenced, &kw).message,
            "missing top-level header and actionable section"
        );
    }

    #[test]
    fn test_structure_ignores_front_matter_and_list_underlines() {
        let kw: Vec<String> = vec!["test".into()];
        let fm = guide("a.md", "---\nname: test runner\n---\n# Guide\n\nprose only\n");
        let f = check_structure(&fm, &kw);
        assert_eq!(f.status, Status::Fail);
        assert_eq!(f.message, "missing actionable section");

        let listed = guide("b.md", "# Guide\n\n- run the test suite\n---\n");
        assert_eq!(check_structure(&listed, &kw).status, Status::Fail);
    }

    #[test]
    fn test_run_checks_honors_disabled_rules() {
        let g = guide("a.md", "# A\n\n## Commands\n");
        let opts = ScanOptions {
            duplication: false,
            ..ScanOptions::default()
        };
        let rules: Vec<String> = run_checks(&g, None, &opts).into_iter().map(|f| f.rule).collect();
        assert_eq!(rules, vec![LINE_COUNT, STRUCTURE]);
    }
}
