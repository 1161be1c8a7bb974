// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `minish`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "minish",
    version,
    about = "Evaluate pre-parsed shell expression trees: processes, pipes, redirections.",
    long_about = None
)]
pub struct CliArgs {
    /// Script to run: a JSON expression tree, or an array of them (one per
    /// line). Use `-` to read from stdin.
    #[arg(value_name = "SCRIPT")]
    pub script: String,

    /// Path to the config file (TOML).
    ///
    /// Default: `Minish.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MINISH_LOG`, then `[log].level`, then `warn` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Do not collect finished background jobs.
    #[arg(long)]
    pub no_reaper: bool,

    /// Load and validate the script, print it, but don't evaluate anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
