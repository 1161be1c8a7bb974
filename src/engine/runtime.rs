// src/engine/runtime.rs

use std::fmt;

use tracing::{debug, info};

use crate::ast::Expr;
use crate::errors::Result;
use crate::exec::{Evaluator, ExitStatus};
use crate::reaper::{ReapedChild, Reaper};

use super::RuntimeOptions;

/// Feeds script lines to the evaluator, with the reaper running alongside.
///
/// Must live on a current-thread tokio runtime (see [`crate::reaper`]).
pub struct Runtime {
    evaluator: Evaluator,
    reaper: Option<Reaper>,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("evaluator", &self.evaluator)
            .field("reaper", &self.reaper.is_some())
            .finish()
    }
}

impl Runtime {
    /// Build the runtime, starting the reaper if the options ask for it.
    pub fn new(evaluator: Evaluator, options: RuntimeOptions) -> Result<Self> {
        let reaper = if options.reaper {
            Some(Reaper::start()?)
        } else {
            None
        };

        Ok(Self { evaluator, reaper })
    }

    /// Evaluate one line and give the reaper a chance to run.
    pub async fn run_line(&mut self, line: &Expr) -> ExitStatus {
        debug!(%line, "evaluating line");
        let status = self.evaluator.run(line);
        debug!(%status, "line finished");

        tokio::task::yield_now().await;
        status
    }

    /// Evaluate every line in order; returns the status of the last one
    /// (success for an empty script).
    pub async fn run_lines(&mut self, lines: &[Expr]) -> ExitStatus {
        let mut last = ExitStatus::SUCCESS;
        for line in lines {
            last = self.run_line(line).await;
        }
        last
    }

    /// Stop the reaper and report what it collected.
    pub async fn shutdown(self) -> Vec<ReapedChild> {
        let reaped = match self.reaper {
            Some(reaper) => reaper.stop().await,
            None => Vec::new(),
        };
        info!(reaped = reaped.len(), "runtime exiting");
        reaped
    }
}
