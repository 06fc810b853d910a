//! CLI argument parsing via `clap`.

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "guidecheck",
    version,
    about = "Advisory checker for AGENTS.md and Markdown guides",
    long_about = "guidecheck — scan a directory tree of Markdown guides and evaluate the context-file checklist: line ceiling, duplication against the nearest parent AGENTS.md, and required sections.\n\nConfiguration precedence: CLI > guidecheck.toml > defaults.",
    after_help = "Examples:\n  guidecheck check\n  guidecheck check docs --max-lines 80\n  guidecheck check --output json\n  guidecheck rules",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current guidecheck version.")]
    Version,
    /// Scan guides under a root directory
    #[command(
        about = "Run the guide checklist",
        long_about = "Discover Markdown guides under ROOT and report pass/fail findings per file. Exits 1 when any finding fails, 2 on a fatal error.",
        after_help = "Examples:\n  guidecheck check .\n  guidecheck check --failures-only\n  guidecheck check --config ci/guidecheck.toml --output json"
    )]
    Check {
        #[arg(help = "Root directory to scan (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Line ceiling per guide (default: 100)")]
        max_lines: Option<usize>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Path to config file (default: nearest guidecheck.toml)")]
        config: Option<String>,
        #[arg(long, action = ArgAction::SetTrue, help = "Print only failing findings (human output)")]
        failures_only: bool,
    },
    /// List available rules
    #[command(about = "List rules", long_about = "List rule names and what they check.")]
    Rules,
    /// Write a default guidecheck.toml
    #[command(
        about = "Create default config",
        long_about = "Write guidecheck.toml with default settings into ROOT. Refuses to overwrite an existing file."
    )]
    Init {
        #[arg(help = "Directory to write guidecheck.toml into (default: current dir)")]
        root: Option<String>,
    },
}
