//! Error types for configuration loading and scanning.
//!
//! Only fatal conditions live here. A file that cannot be read during a
//! scan is not an error at this level; it becomes a `read-error` finding.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unsupported output mode '{0}' (expected human|json)")]
    Output(String),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid root {}: not an existing directory", .0.display())]
    InvalidRoot(PathBuf),

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("pattern '{0}' reaches outside the scan root")]
    PatternOutsideRoot(String),
}
