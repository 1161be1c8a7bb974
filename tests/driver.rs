// tests/driver.rs

mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::{init_tracing, serial};

use std::error::Error;
use std::fs;
use std::path::Path;

use clap::Parser;

use minish::cli::{CliArgs, LogLevel};
use minish::exec::ExitStatus;

type TestResult = Result<(), Box<dyn Error>>;

fn args_for(script: &Path) -> CliArgs {
    CliArgs::try_parse_from(["minish", script.to_str().unwrap()]).unwrap()
}

#[test]
fn test_cli_flags_parse() {
    let args = CliArgs::try_parse_from([
        "minish",
        "--config",
        "other.toml",
        "--log-level",
        "debug",
        "--no-reaper",
        "--dry-run",
        "-",
    ])
    .unwrap();

    assert_eq!(args.script, "-");
    assert_eq!(args.config.as_deref(), Some(Path::new("other.toml")));
    assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    assert!(args.no_reaper);
    assert!(args.dry_run);
}

#[test]
fn test_cli_requires_script() {
    assert!(CliArgs::try_parse_from(["minish"]).is_err());
}

#[tokio::test]
async fn test_run_returns_last_line_status() -> TestResult {
    init_tracing();
    let _guard = serial();
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("out.txt");
    let script = dir.path().join("script.json");
    fs::write(
        &script,
        format!(
            r#"[
                {{ "kind": "redirect_out", "arguments": ["{}"],
                   "left": {{ "kind": "simple", "arguments": ["echo", "ran"] }} }},
                {{ "kind": "simple", "arguments": ["sh", "-c", "exit 3"] }}
            ]"#,
            out.display()
        ),
    )?;

    let status = minish::run(args_for(&script), ConfigFileBuilder::new().build()).await?;

    assert_eq!(status.code(), 3);
    assert_eq!(fs::read_to_string(&out)?, "ran\n");
    Ok(())
}

#[tokio::test]
async fn test_dry_run_evaluates_nothing() -> TestResult {
    let _guard = serial();
    let dir = tempfile::tempdir()?;
    let probe = dir.path().join("probe");
    let script = dir.path().join("script.json");
    fs::write(
        &script,
        format!(
            r#"{{ "kind": "simple", "arguments": ["touch", "{}"] }}"#,
            probe.display()
        ),
    )?;

    let mut args = args_for(&script);
    args.dry_run = true;
    let status = minish::run(args, ConfigFileBuilder::new().build()).await?;

    assert_eq!(status, ExitStatus::SUCCESS);
    assert!(!probe.exists());
    Ok(())
}

#[tokio::test]
async fn test_invalid_script_is_an_error() -> TestResult {
    let _guard = serial();
    let dir = tempfile::tempdir()?;
    let script = dir.path().join("script.json");
    fs::write(&script, r#"{ "kind": "pipe" }"#)?;

    let result = minish::run(args_for(&script), ConfigFileBuilder::new().build()).await;

    assert!(result.is_err());
    Ok(())
}
