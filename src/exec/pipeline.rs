// src/exec/pipeline.rs

//! Two-process pipelines and detached background jobs.

use std::os::fd::{AsRawFd, OwnedFd, RawFd};

use nix::fcntl::OFlag;
use nix::libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::unistd::{close, pipe2, Pid};
use tracing::{debug, trace};

use crate::ast::Expr;

use super::builtin::diagnostic;
use super::process::{fork_child, wait_for};
use super::redirect::StdioOverride;
use super::{EvalError, Evaluator, ExitStatus};

/// Run `left | right` and return the downstream status.
///
/// Both ends are close-on-exec, so exec'd commands only ever see the copy
/// that was dup'ed onto their stdin/stdout.
pub fn run_pipe(evaluator: &Evaluator, left: &Expr, right: &Expr) -> Result<ExitStatus, EvalError> {
    let (read_end, write_end) = pipe2(OFlag::O_CLOEXEC).map_err(EvalError::Pipe)?;
    trace!(
        read = read_end.as_raw_fd(),
        write = write_end.as_raw_fd(),
        "pipe created"
    );

    let writer = spawn_branch(evaluator, left, &write_end, &read_end, STDOUT_FILENO)?;

    let reader = match spawn_branch(evaluator, right, &read_end, &write_end, STDIN_FILENO) {
        Ok(pid) => pid,
        Err(err) => {
            // Close our ends first so the writer sees EPIPE instead of hanging.
            drop(read_end);
            drop(write_end);
            let _ = wait_for(writer);
            return Err(err);
        }
    };

    // The parent must not keep a write end open, or the reader never sees EOF.
    drop(read_end);
    drop(write_end);

    let upstream = wait_for(writer);
    let downstream = wait_for(reader)?;
    let upstream = upstream?;

    debug!(
        writer = %writer,
        reader = %reader,
        upstream = %upstream,
        downstream = %downstream,
        "pipeline finished"
    );
    Ok(downstream)
}

/// Fork one half of a pipeline: `stream` is rebound onto `used`, `unused` is
/// closed straight away.
fn spawn_branch(
    evaluator: &Evaluator,
    expr: &Expr,
    used: &OwnedFd,
    unused: &OwnedFd,
    stream: RawFd,
) -> Result<Pid, EvalError> {
    fork_child(|| {
        let _ = close(unused.as_raw_fd());
        let status = run_branch(evaluator, expr, used.as_raw_fd(), stream);
        child_exit_code(status)
    })
}

fn run_branch(
    evaluator: &Evaluator,
    expr: &Expr,
    used: RawFd,
    stream: RawFd,
) -> Result<ExitStatus, EvalError> {
    let guard = StdioOverride::install(used, &[stream])?;
    let status = evaluator.evaluate(expr);
    let restored = guard.restore();
    let _ = close(used);
    let status = status?;
    restored?;
    Ok(status)
}

/// Start `left` in a detached child and return at once.
pub fn run_background(evaluator: &Evaluator, left: &Expr) -> Result<ExitStatus, EvalError> {
    let pid = fork_child(|| child_exit_code(evaluator.evaluate(left)))?;
    debug!(pid = %pid, "background job started");
    Ok(ExitStatus::SUCCESS)
}

/// Exit code for a forked evaluation. Resource errors stop at the child
/// boundary: they are reported on its stderr and become a plain failure.
fn child_exit_code(result: Result<ExitStatus, EvalError>) -> i32 {
    match result {
        Ok(status) => status.code(),
        Err(err) => {
            diagnostic(&format!("minish: {err}"));
            ExitStatus::FAILURE.code()
        }
    }
}
