// src/exec/mod.rs

//! Process execution layer: the recursive evaluator.
//!
//! [`Evaluator::evaluate`] walks an [`Expr`] depth-first and turns it into OS
//! process activity, returning the exit status of the node. The submodules
//! hold the moving parts:
//!
//! - [`builtin`]: `echo` and `source`, plus raw writes to descriptors 1/2.
//! - [`process`]: fork/exec/wait helpers.
//! - [`pipeline`]: `left | right` and `left &`.
//! - [`redirect`]: opening redirection targets and rebinding stdio.
//! - [`status`] / [`error`]: the two result channels (command status vs.
//!   resource failure).

pub mod builtin;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod redirect;
pub mod status;

pub use builtin::Builtin;
pub use error::EvalError;
pub use status::ExitStatus;

use std::os::fd::AsRawFd;
use std::path::Path;

use nix::libc::mode_t;
use nix::sys::stat::Mode;
use tracing::{error, trace};

use crate::ast::{Expr, RedirectKind};
use crate::config::ConfigFile;
use crate::types::{FailurePolicy, DEFAULT_CREATE_MODE};

use self::builtin::diagnostic;
use self::process::CommandLine;
use self::redirect::{open_target, StdioOverride};

/// Recursive tree evaluator.
///
/// Holds only immutable settings; there is no state carried between
/// evaluations.
#[derive(Debug, Clone)]
pub struct Evaluator {
    policy: FailurePolicy,
    create_mode: Mode,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            policy: FailurePolicy::default(),
            create_mode: Mode::from_bits_truncate(DEFAULT_CREATE_MODE as mode_t),
        }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new()
            .with_policy(cfg.evaluator.on_resource_error)
            .with_create_mode(cfg.evaluator.create_mode)
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Permission bits for files created by output redirections.
    pub fn with_create_mode(mut self, mode: u32) -> Self {
        self.create_mode = Mode::from_bits_truncate(mode as mode_t);
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Evaluate one top-level line, applying the failure policy to resource
    /// errors.
    ///
    /// With [`FailurePolicy::Abort`] a resource error terminates the process
    /// with status 1.
    pub fn run(&self, expr: &Expr) -> ExitStatus {
        match self.evaluate(expr) {
            Ok(status) => status,
            Err(err) => {
                error!(error = %err, policy = ?self.policy, "evaluation failed");
                diagnostic(&format!("minish: {err}"));
                match self.policy {
                    FailurePolicy::Contain => ExitStatus::FAILURE,
                    FailurePolicy::Abort => std::process::exit(ExitStatus::FAILURE.code()),
                }
            }
        }
    }

    /// Evaluate `expr` and return its exit status.
    ///
    /// Standard descriptors are the same before and after the call on every
    /// path, including `Err`.
    pub fn evaluate(&self, expr: &Expr) -> Result<ExitStatus, EvalError> {
        trace!(kind = expr.kind_name(), "evaluating node");

        match expr {
            Expr::Empty => Ok(ExitStatus::SUCCESS),
            Expr::Simple(words) => self.eval_simple(words),
            Expr::Background(left) => pipeline::run_background(self, left),
            Expr::Sequence(left, right) => {
                self.evaluate(left)?;
                self.evaluate(right)
            }
            Expr::AndThen(left, right) => {
                let status = self.evaluate(left)?;
                if status.is_success() {
                    self.evaluate(right)
                } else {
                    Ok(status)
                }
            }
            Expr::OrElse(left, right) => {
                let status = self.evaluate(left)?;
                if status.is_success() {
                    Ok(status)
                } else {
                    self.evaluate(right)
                }
            }
            Expr::Pipe(left, right) => pipeline::run_pipe(self, left, right),
            Expr::Redirect { kind, target, body } => self.eval_redirect(*kind, target, body),
            Expr::Unsupported(kind) => {
                diagnostic(&format!("minish: {kind}: not yet implemented"));
                Ok(ExitStatus::FAILURE)
            }
        }
    }

    fn eval_simple(&self, words: &[String]) -> Result<ExitStatus, EvalError> {
        let Some(name) = words.first() else {
            diagnostic("minish: empty command");
            return Ok(ExitStatus::FAILURE);
        };

        if let Some(builtin) = Builtin::lookup(name) {
            trace!(builtin = ?builtin, "running builtin");
            return Ok(builtin.run(&words[1..]));
        }

        match CommandLine::new(words) {
            Ok(command) => process::run_command(&command),
            Err(reason) => {
                diagnostic(&format!("minish: {name}: {reason}"));
                Ok(ExitStatus::FAILURE)
            }
        }
    }

    fn eval_redirect(
        &self,
        kind: RedirectKind,
        target: &Path,
        body: &Expr,
    ) -> Result<ExitStatus, EvalError> {
        let file = open_target(kind, target, self.create_mode)?;
        let guard = StdioOverride::install(file.as_raw_fd(), kind.streams())?;

        let status = self.evaluate(body);
        let restored = guard.restore();
        drop(file);

        let status = status?;
        restored?;
        Ok(status)
    }
}
