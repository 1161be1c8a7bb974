// src/exec/error.rs

use std::os::fd::RawFd;
use std::path::PathBuf;

use nix::errno::Errno;
use nix::unistd::Pid;
use thiserror::Error;

/// OS-resource failures raised while evaluating a tree.
///
/// These are distinct from a command failing (which is just a nonzero
/// [`ExitStatus`](super::ExitStatus)): they mean the evaluator itself could
/// not do its job, and they unwind to the nearest containing evaluation.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("could not create child process: {0}")]
    Fork(#[source] Errno),

    #[error("could not create pipe: {0}")]
    Pipe(#[source] Errno),

    #[error("could not duplicate descriptor {fd}: {source}")]
    Dup {
        fd: RawFd,
        #[source]
        source: Errno,
    },

    #[error("could not redirect descriptor {fd}: {source}")]
    Redirect {
        fd: RawFd,
        #[source]
        source: Errno,
    },

    #[error("could not restore descriptor {fd}: {source}")]
    Restore {
        fd: RawFd,
        #[source]
        source: Errno,
    },

    #[error("{}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: Errno,
    },

    #[error("could not wait for process {pid}: {source}")]
    Wait {
        pid: Pid,
        #[source]
        source: Errno,
    },
}
