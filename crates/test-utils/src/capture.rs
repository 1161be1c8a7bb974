//! Run an evaluation in a throwaway child process and capture what it did.
//!
//! Evaluating a tree rebinds the process-wide standard descriptors, forks and
//! waits. Doing that directly inside the test harness would interleave with
//! its own output and with other tests, so each evaluation runs in a forked
//! child with:
//!
//! - stdin from `/dev/null`,
//! - stdout and stderr going to temp files,
//! - a report file recording the line status and whether descriptors 0-2
//!   still pointed at the same files afterwards.

use std::fs::{self, File};
use std::io;
use std::os::fd::AsRawFd;
use std::path::Path;

use minish::ast::Expr;
use minish::exec::process::{fork_child, wait_for};
use minish::exec::{Evaluator, ExitStatus};
use nix::libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};
use nix::sys::stat::fstat;
use nix::unistd::dup2;

/// What a captured evaluation produced.
#[derive(Debug, Clone)]
pub struct Captured {
    /// Line status from `Evaluator::run`, or the child's own exit status when
    /// the evaluation never returned (abort policy).
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    /// Descriptors 0-2 referred to the same files before and after.
    pub stdio_preserved: bool,
    /// `Evaluator::run` returned normally.
    pub completed: bool,
}

/// Capture with a default evaluator.
pub fn capture(expr: &Expr) -> Captured {
    capture_with(&Evaluator::new(), expr)
}

pub fn capture_with(evaluator: &Evaluator, expr: &Expr) -> Captured {
    let dir = tempfile::tempdir().expect("failed to create capture dir");
    let out_path = dir.path().join("stdout");
    let err_path = dir.path().join("stderr");
    let report_path = dir.path().join("report");

    let pid = fork_child(|| {
        match evaluate_in_child(evaluator, expr, &out_path, &err_path, &report_path) {
            Ok(()) => 0,
            Err(_) => 99,
        }
    })
    .expect("failed to fork capture child");
    let child_status = wait_for(pid).expect("failed to wait for capture child");

    let stdout = fs::read_to_string(&out_path).unwrap_or_default();
    let stderr = fs::read_to_string(&err_path).unwrap_or_default();

    match fs::read_to_string(&report_path) {
        Ok(report) => {
            let mut lines = report.lines();
            let code: i32 = lines
                .next()
                .and_then(|l| l.parse().ok())
                .expect("malformed capture report");
            let preserved = lines.next() == Some("true");
            Captured {
                status: ExitStatus::from_code(code),
                stdout,
                stderr,
                stdio_preserved: preserved,
                completed: true,
            }
        }
        Err(_) => Captured {
            status: child_status,
            stdout,
            stderr,
            stdio_preserved: false,
            completed: false,
        },
    }
}

fn evaluate_in_child(
    evaluator: &Evaluator,
    expr: &Expr,
    out_path: &Path,
    err_path: &Path,
    report_path: &Path,
) -> io::Result<()> {
    {
        let null = File::open("/dev/null")?;
        let out = File::create(out_path)?;
        let err = File::create(err_path)?;
        dup2(null.as_raw_fd(), STDIN_FILENO)?;
        dup2(out.as_raw_fd(), STDOUT_FILENO)?;
        dup2(err.as_raw_fd(), STDERR_FILENO)?;
    }

    let before = stdio_identities()?;
    let status = evaluator.run(expr);
    let after = stdio_identities()?;

    fs::write(report_path, format!("{}\n{}\n", status.code(), before == after))
}

fn stdio_identities() -> io::Result<[(u64, u64); 3]> {
    let mut ids = [(0, 0); 3];
    for (slot, fd) in ids.iter_mut().zip([STDIN_FILENO, STDOUT_FILENO, STDERR_FILENO]) {
        let st = fstat(fd)?;
        *slot = (st.st_dev as u64, st.st_ino as u64);
    }
    Ok(ids)
}
