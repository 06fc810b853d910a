//! Loaded guide file.

use std::path::PathBuf;

#[derive(Debug, Clone)]
/// A Markdown guide read from disk. Immutable once loaded.
pub struct GuideFile {
    /// Absolute (root-joined) path.
    pub path: PathBuf,
    /// Path relative to the scan root, used in reports.
    pub display: String,
    pub content: String,
    pub lines: usize,
    /// Nearest context file in an ancestor directory, if any.
    pub parent: Option<PathBuf>,
}

impl GuideFile {
    pub fn new(path: PathBuf, display: String, content: String) -> Self {
        let lines = content.lines().count();
        Self {
            path,
            display,
            content,
            lines,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: Option<PathBuf>) -> Self {
        self.parent = parent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count_ignores_trailing_newline() {
        let g = GuideFile::new("a.md".into(), "a.md".into(), "# A\n\nbody\n".into());
        assert_eq!(g.lines, 3);
        let g = GuideFile::new("b.md".into(), "b.md".into(), String::new());
        assert_eq!(g.lines, 0);
    }
}
