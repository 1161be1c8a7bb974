// src/main.rs

use std::process::ExitCode;

use minish::{cli, config, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run_main().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("minish error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run_main() -> anyhow::Result<ExitCode> {
    let args = cli::parse();
    let cfg = config::load_or_default(args.config.as_deref())?;
    logging::init_logging(args.log_level, cfg.log.level.as_deref())?;
    let status = run(args, cfg).await?;
    Ok(status.to_exit_code())
}
