// src/lib.rs

pub mod ast;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod reaper;
pub mod script;
pub mod types;

use anyhow::Result;
use tracing::{debug, info};

use crate::ast::Expr;
use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::engine::{Runtime, RuntimeOptions};
use crate::exec::{Evaluator, ExitStatus};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - script loading
/// - the evaluator, configured from `cfg`
/// - the background-job reaper (unless disabled)
///
/// Returns the status of the last evaluated line.
pub async fn run(args: CliArgs, cfg: ConfigFile) -> Result<ExitStatus> {
    let lines = script::load_script(&args.script)?;

    if args.dry_run {
        print_dry_run(&cfg, &lines);
        return Ok(ExitStatus::SUCCESS);
    }

    let evaluator = Evaluator::from_config(&cfg);
    let options = RuntimeOptions {
        reaper: cfg.reaper.enabled && !args.no_reaper,
    };
    info!(
        lines = lines.len(),
        policy = ?evaluator.policy(),
        reaper = options.reaper,
        "starting evaluation"
    );

    let mut runtime = Runtime::new(evaluator, options)?;
    let status = runtime.run_lines(&lines).await;
    runtime.shutdown().await;

    Ok(status)
}

/// Print the effective settings and each parsed line.
fn print_dry_run(cfg: &ConfigFile, lines: &[Expr]) {
    println!("minish dry-run");
    println!(
        "  evaluator.on_resource_error = {:?}",
        cfg.evaluator.on_resource_error
    );
    println!("  evaluator.create_mode = {:o}", cfg.evaluator.create_mode);
    println!("  reaper.enabled = {}", cfg.reaper.enabled);
    println!();

    println!("lines ({}):", lines.len());
    for (idx, line) in lines.iter().enumerate() {
        println!("  [{}] {line}", idx + 1);
    }

    debug!("dry-run complete (no evaluation)");
}
