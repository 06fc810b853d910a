//! Configuration discovery and effective settings resolution.
//!
//! guidecheck reads `guidecheck.toml|yaml|yml` from the scan root (or the
//! closest ancestor, stopping at a `.git` boundary) and merges it with CLI
//! flags to produce an `Effective` config.
//! Defaults:
//! - `patterns`: `["**/*.md"]`
//! - `exclude`: `target`, `node_modules`, `.git` trees
//! - `context_names`: `["AGENTS.md"]`
//! - `output`: `human`
//! - `rules.line-count.max_lines`: 100
//! - `rules.duplication.min_chars`: 40
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_NAMES: [&str; 3] = ["guidecheck.toml", "guidecheck.yaml", "guidecheck.yml"];

pub const DEFAULT_MAX_LINES: usize = 100;
pub const DEFAULT_MIN_CHARS: usize = 40;

pub const DEFAULT_KEYWORDS: [&str; 8] = [
    "commands",
    "usage",
    "workflow",
    "getting started",
    "quick start",
    "build",
    "test",
    "setup",
];

/// Default config written by `guidecheck init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"patterns = ["**/*.md"]
exclude = ["**/target/**", "**/node_modules/**", "**/.git/**"]
context_names = ["AGENTS.md"]
output = "human"

[rules.line-count]
enabled = true
max_lines = 100

[rules.duplication]
enabled = true
min_chars = 40

[rules.structure]
enabled = true
keywords = ["commands", "usage", "workflow", "getting started", "quick start", "build", "test", "setup"]
"#;

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `guidecheck.toml|yaml`.
pub struct GuidecheckConfig {
    pub patterns: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub context_names: Option<Vec<String>>,
    pub output: Option<String>,
    #[serde(default)]
    pub rules: RulesCfg,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Per-rule sections under `[rules.<name>]`.
pub struct RulesCfg {
    #[serde(rename = "line-count")]
    pub line_count: Option<LineCountCfg>,
    pub duplication: Option<DuplicationCfg>,
    pub structure: Option<StructureCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct LineCountCfg {
    pub enabled: Option<bool>,
    pub max_lines: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct DuplicationCfg {
    pub enabled: Option<bool>,
    pub min_chars: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct StructureCfg {
    pub enabled: Option<bool>,
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Settings the scanner consumes. Independent of output concerns.
pub struct ScanOptions {
    pub patterns: Vec<String>,
    pub exclude: Vec<String>,
    pub context_names: Vec<String>,
    pub line_count: bool,
    pub max_lines: usize,
    pub duplication: bool,
    pub min_chars: usize,
    pub structure: bool,
    pub keywords: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            patterns: vec!["**/*.md".to_string()],
            exclude: vec![
                "**/target/**".to_string(),
                "**/node_modules/**".to_string(),
                "**/.git/**".to_string(),
            ],
            context_names: vec!["AGENTS.md".to_string()],
            line_count: true,
            max_lines: DEFAULT_MAX_LINES,
            duplication: true,
            min_chars: DEFAULT_MIN_CHARS,
            structure: true,
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            other => Err(ConfigError::Output(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    /// Config file that contributed settings, if any.
    pub config_path: Option<PathBuf>,
    pub output: OutputMode,
    pub options: ScanOptions,
}

/// Walk upward from `start` looking for a config file.
///
/// Stops after checking a directory that contains `.git`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let start = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    let mut cur = start.as_path();
    loop {
        for name in CONFIG_NAMES {
            let p = cur.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
        if cur.join(".git").exists() {
            return None;
        }
        cur = cur.parent()?;
    }
}

/// Load a config file, choosing the parser by extension.
pub fn load_config(path: &Path) -> Result<GuidecheckConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&s).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    } else {
        toml::from_str(&s).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_config: Option<&str>,
    cli_max_lines: Option<usize>,
    cli_output: Option<&str>,
) -> Result<Effective, ConfigError> {
    let root = PathBuf::from(cli_root.unwrap_or("."));
    let config_path = match cli_config {
        Some(p) => Some(PathBuf::from(p)),
        None => find_config(&root),
    };
    let cfg = match config_path.as_ref() {
        Some(p) => load_config(p)?,
        None => GuidecheckConfig::default(),
    };

    let output = match cli_output.map(str::to_string).or(cfg.output) {
        Some(s) => OutputMode::parse(&s)?,
        None => OutputMode::Human,
    };

    let defaults = ScanOptions::default();
    let lc = cfg.rules.line_count.unwrap_or_default();
    let dup = cfg.rules.duplication.unwrap_or_default();
    let st = cfg.rules.structure.unwrap_or_default();
    let options = ScanOptions {
        patterns: cfg.patterns.unwrap_or(defaults.patterns),
        exclude: cfg.exclude.unwrap_or(defaults.exclude),
        context_names: cfg.context_names.unwrap_or(defaults.context_names),
        line_count: lc.enabled.unwrap_or(true),
        max_lines: cli_max_lines.or(lc.max_lines).unwrap_or(defaults.max_lines),
        duplication: dup.enabled.unwrap_or(true),
        min_chars: dup.min_chars.unwrap_or(defaults.min_chars),
        structure: st.enabled.unwrap_or(true),
        keywords: st.keywords.unwrap_or(defaults.keywords),
    };

    Ok(Effective {
        root,
        config_path,
        output,
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None, None).unwrap();
        assert!(eff.config_path.is_none());
        assert_eq!(eff.output, OutputMode::Human);
        assert_eq!(eff.options, ScanOptions::default());
        assert_eq!(eff.options.max_lines, 100);
    }

    #[test]
    fn test_load_toml_and_cli_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("guidecheck.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
patterns = ["**/AGENTS.md"]
output = "json"
[rules.line-count]
max_lines = 60
[rules.duplication]
enabled = false
[rules.structure]
keywords = ["commands"]
"#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None).unwrap();
        assert_eq!(eff.output, OutputMode::Json);
        assert_eq!(eff.options.patterns, vec!["**/AGENTS.md"]);
        assert_eq!(eff.options.max_lines, 60);
        assert!(!eff.options.duplication);
        assert!(eff.options.structure);
        assert_eq!(eff.options.keywords, vec!["commands"]);

        // CLI wins over the file
        let eff = resolve_effective(root.to_str(), None, Some(80), Some("human")).unwrap();
        assert_eq!(eff.options.max_lines, 80);
        assert_eq!(eff.output, OutputMode::Human);
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("guidecheck.yaml"),
            "context_names: [AGENTS.md, CLAUDE.md]\nrules:\n  line-count:\n    max_lines: 20\n",
        )
        .unwrap();
        let eff = resolve_effective(root.to_str(), None, None, None).unwrap();
        assert_eq!(eff.options.context_names, vec!["AGENTS.md", "CLAUDE.md"]);
        assert_eq!(eff.options.max_lines, 20);
    }

    #[test]
    fn test_config_found_in_ancestor_but_not_past_git() {
        let dir = tempdir().unwrap();
        let outer = dir.path();
        fs::write(outer.join("guidecheck.toml"), "output = \"json\"\n").unwrap();
        let repo = outer.join("repo");
        let nested = repo.join("docs");
        fs::create_dir_all(&nested).unwrap();

        // No .git yet: the ancestor config is visible
        assert!(find_config(&nested).is_some());

        // A .git directory bounds the search
        fs::create_dir(repo.join(".git")).unwrap();
        assert!(find_config(&nested).is_none());
    }

    #[test]
    fn test_explicit_config_path_and_parse_error() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let cfg = root.join("custom.toml");
        fs::write(&cfg, "patterns = [").unwrap();
        let err = resolve_effective(root.to_str(), cfg.to_str(), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_output_mode() {
        let dir = tempdir().unwrap();
        let err = resolve_effective(dir.path().to_str(), None, None, Some("xml")).unwrap_err();
        assert!(matches!(err, ConfigError::Output(ref s) if s == "xml"));
    }

    #[test]
    fn test_default_config_text_parses_to_defaults() {
        let cfg: GuidecheckConfig = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        let lc = cfg.rules.line_count.unwrap();
        assert_eq!(lc.max_lines, Some(DEFAULT_MAX_LINES));
        assert_eq!(cfg.rules.duplication.unwrap().min_chars, Some(DEFAULT_MIN_CHARS));
        assert_eq!(
            cfg.rules.structure.unwrap().keywords.unwrap(),
            DEFAULT_KEYWORDS.to_vec()
        );
    }
}
