//! guidecheck core library.
//!
//! This crate exposes a programmatic API for scanning a tree of Markdown
//! guides (`AGENTS.md` context files and loose style guides) against a
//! small editorial checklist.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `discover`: Guide discovery and nearest-parent resolution.
//! - `markdown`: Block splitting and header detection.
//! - `checks`: The checklist rules.
//! - `scan`: The scanner producing per-file findings.
//! - `models`: Guide, finding, and report structs.
//! - `output`: Human/JSON printers.
//! - `error`: Fatal error types.
//! - `utils`: Supporting helpers.
pub mod checks;
pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod markdown;
pub mod models;
pub mod output;
pub mod scan;
pub mod utils;

pub use config::ScanOptions;
pub use error::{ConfigError, ScanError};
pub use models::{FileReport, Finding, ScanReport, Status};
pub use scan::run_scan;
