//! guidecheck CLI binary entry point.
//! Delegates to the library for config resolution and scanning, then prints results.

use clap::Parser;
use guidecheck::checks::ALL_RULES;
use guidecheck::cli::{Cli, Commands};
use guidecheck::config::{self, OutputMode};
use guidecheck::{output, scan, utils};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const FATAL: u8 = 2;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("GUIDECHECK_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    // Ignore a second init (e.g. when embedded in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::Check {
            root,
            max_lines,
            output,
            config,
            failures_only,
        } => run_check(
            root.as_deref(),
            config.as_deref(),
            max_lines,
            output.as_deref(),
            failures_only,
        ),
        Commands::Rules => {
            for (name, desc) in ALL_RULES {
                println!("{name}\n    {desc}");
            }
            ExitCode::SUCCESS
        }
        Commands::Init { root } => run_init(root.as_deref()),
    }
}

fn run_check(
    root: Option<&str>,
    config_path: Option<&str>,
    max_lines: Option<usize>,
    output: Option<&str>,
    failures_only: bool,
) -> ExitCode {
    let eff = match config::resolve_effective(root, config_path, max_lines, output) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            return ExitCode::from(FATAL);
        }
    };
    if eff.output == OutputMode::Human {
        match eff.config_path.as_ref() {
            Some(p) => eprintln!("{} Using config {}", utils::info_prefix(), p.display()),
            None => eprintln!(
                "{} No guidecheck.toml found; using defaults.",
                utils::note_prefix()
            ),
        }
    }
    let report = match scan::run_scan(&eff.root, &eff.options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            return ExitCode::from(FATAL);
        }
    };
    output::print_report(&report, eff.output, failures_only);
    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_init(root: Option<&str>) -> ExitCode {
    let dir = PathBuf::from(root.unwrap_or("."));
    if !dir.is_dir() {
        eprintln!(
            "{} invalid root {}: not an existing directory",
            utils::error_prefix(),
            dir.display()
        );
        return ExitCode::from(FATAL);
    }
    let path = dir.join(config::CONFIG_NAMES[0]);
    let written = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .and_then(|mut f| f.write_all(config::DEFAULT_CONFIG_TOML.as_bytes()));
    match written {
        Ok(()) => {
            println!("created: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            eprintln!("{} {} already exists", utils::error_prefix(), path.display());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!(
                "{} failed to write {}: {}",
                utils::error_prefix(),
                path.display(),
                e
            );
            ExitCode::from(FATAL)
        }
    }
}
