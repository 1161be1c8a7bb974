// src/exec/process.rs

//! Child process primitives: fork, exec, wait.

use std::ffi::CString;
use std::panic::{self, AssertUnwindSafe};

use nix::errno::Errno;
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::libc;
use nix::unistd::{execvp, fork, ForkResult, Pid};
use tracing::{debug, trace};

use super::builtin::diagnostic;
use super::{EvalError, ExitStatus};

/// Fork, run `child` in the new process and exit with the code it returns.
///
/// Returns the child's pid in the parent. The closure never returns into the
/// caller's frames on the child side: a panic is turned into exit code 101.
pub fn fork_child<F>(child: F) -> Result<Pid, EvalError>
where
    F: FnOnce() -> i32,
{
    // SAFETY: the child only runs evaluator code and then `_exit`s; it never
    // returns into the parent's stack or runs its destructors.
    match unsafe { fork() }.map_err(EvalError::Fork)? {
        ForkResult::Parent { child } => {
            trace!(pid = %child, "forked child");
            Ok(child)
        }
        ForkResult::Child => {
            reset_inherited_signals();
            let code = panic::catch_unwind(AssertUnwindSafe(child)).unwrap_or(101);
            // SAFETY: `_exit` skips atexit handlers and never returns.
            unsafe { libc::_exit(code) }
        }
    }
}

/// Children must not feed the parent's SIGCHLD subscription, and exec'd
/// programs expect SIGPIPE to kill them (the Rust runtime ignores it).
fn reset_inherited_signals() {
    for sig in [Signal::SIGCHLD, Signal::SIGPIPE] {
        // SAFETY: installing the default disposition has no handler code.
        let _ = unsafe { signal(sig, SigHandler::SigDfl) };
    }
}

/// Block until `pid` terminates and translate how it ended.
pub fn wait_for(pid: Pid) -> Result<ExitStatus, EvalError> {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => {
                trace!(pid = %pid, code, "child exited");
                return Ok(ExitStatus::from_code(code));
            }
            Ok(WaitStatus::Signaled(_, sig, core_dumped)) => {
                debug!(pid = %pid, signal = %sig, core_dumped, "child killed by signal");
                return Ok(ExitStatus::from_signal(sig));
            }
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            Err(source) => return Err(EvalError::Wait { pid, source }),
        }
    }
}

/// Argument vector ready for `execvp`, built before forking.
#[derive(Debug)]
pub struct CommandLine {
    argv: Vec<CString>,
}

impl CommandLine {
    /// Fails when there is no command name or an argument holds a NUL byte.
    pub fn new(words: &[String]) -> Result<Self, String> {
        if words.is_empty() {
            return Err("empty command".to_string());
        }
        let argv = words
            .iter()
            .map(|w| {
                CString::new(w.as_bytes())
                    .map_err(|_| format!("{w:?}: argument contains a NUL byte"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { argv })
    }

    fn name(&self) -> String {
        self.argv[0].to_string_lossy().into_owned()
    }

    /// Replace the current process image. Only returns on failure, with the
    /// exit code the child should terminate with.
    pub fn exec(&self) -> i32 {
        let err = match execvp(&self.argv[0], &self.argv) {
            Ok(never) => match never {},
            Err(err) => err,
        };
        let (status, reason) = match err {
            Errno::ENOENT => (ExitStatus::NOT_FOUND, "command not found".to_string()),
            other => (ExitStatus::CANNOT_EXECUTE, other.desc().to_string()),
        };
        diagnostic(&format!("minish: {}: {}", self.name(), reason));
        status.code()
    }
}

/// Spawn an external command and wait for it.
pub fn run_command(command: &CommandLine) -> Result<ExitStatus, EvalError> {
    let pid = fork_child(|| command.exec())?;
    debug!(pid = %pid, cmd = %command.name(), "spawned command");
    wait_for(pid)
}
