// src/exec/builtin.rs

//! In-process built-in commands and raw stdio writes.
//!
//! Built-ins write straight to descriptors 1 and 2 rather than through
//! `std::io::stdout()`: output must land wherever the descriptor points *right
//! now* (after redirections), and forked children must never touch a std
//! stream lock that another thread may have held at fork time.

use std::fs::File;
use std::io::{self, Write};
use std::mem::ManuallyDrop;
use std::os::fd::{FromRawFd, RawFd};

use nix::libc::{STDERR_FILENO, STDOUT_FILENO};
use tracing::debug;

use super::ExitStatus;

/// Commands the evaluator handles without spawning a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Echo,
    Source,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "echo" => Some(Builtin::Echo),
            "source" => Some(Builtin::Source),
            _ => None,
        }
    }

    /// Run the built-in. `args` excludes the command name.
    pub fn run(self, args: &[String]) -> ExitStatus {
        match self {
            Builtin::Echo => echo(args),
            Builtin::Source => {
                diagnostic("minish: source: command not yet implemented");
                ExitStatus::FAILURE
            }
        }
    }
}

fn echo(args: &[String]) -> ExitStatus {
    let mut line = args.join(" ");
    line.push('\n');

    match write_all_raw(STDOUT_FILENO, line.as_bytes()) {
        Ok(()) => ExitStatus::SUCCESS,
        Err(err) => {
            debug!(error = %err, "echo: write to stdout failed");
            ExitStatus::FAILURE
        }
    }
}

/// Write `msg` plus a newline to descriptor 2. Failures are ignored; there is
/// nowhere left to report them.
pub fn diagnostic(msg: &str) {
    let mut line = String::with_capacity(msg.len() + 1);
    line.push_str(msg);
    line.push('\n');
    let _ = write_all_raw(STDERR_FILENO, line.as_bytes());
}

pub(crate) fn write_all_raw(fd: RawFd, bytes: &[u8]) -> io::Result<()> {
    // SAFETY: `fd` is one of the process's standard descriptors; the
    // `ManuallyDrop` wrapper keeps it from being closed here.
    let mut file = ManuallyDrop::new(unsafe { File::from_raw_fd(fd) });
    file.write_all(bytes)
}
