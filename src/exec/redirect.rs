// src/exec/redirect.rs

//! Temporary rebinding of the standard descriptors.
//!
//! The three standard descriptors are process-wide state shared by every
//! node of a tree. Whoever rebinds one must put the previous target back on
//! every exit path, so that sibling subtrees see an unchanged environment.
//! [`StdioOverride`] does this: `restore()` on the normal path, `Drop` as a
//! best-effort fallback when an error unwinds past it.

use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};
use std::path::Path;

use nix::fcntl::{fcntl, open, FcntlArg, OFlag};
use nix::libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};
use nix::sys::stat::Mode;
use nix::unistd::dup2;
use tracing::{trace, warn};

use crate::ast::RedirectKind;

use super::EvalError;

/// Saved copies are parked at or above this number so they stay out of the
/// way of the low descriptors commands expect.
const SAVED_FD_FLOOR: RawFd = 10;

impl RedirectKind {
    /// Standard descriptors rebound by this kind of redirection.
    pub fn streams(self) -> &'static [RawFd] {
        match self {
            RedirectKind::In => &[STDIN_FILENO],
            RedirectKind::Out | RedirectKind::Append => &[STDOUT_FILENO],
            RedirectKind::Err => &[STDERR_FILENO],
            RedirectKind::ErrAndOut => &[STDOUT_FILENO, STDERR_FILENO],
        }
    }

    fn open_flags(self) -> OFlag {
        let base = match self {
            RedirectKind::In => OFlag::O_RDONLY,
            RedirectKind::Append => OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_APPEND,
            RedirectKind::Out | RedirectKind::Err | RedirectKind::ErrAndOut => {
                OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC
            }
        };
        base | OFlag::O_CLOEXEC
    }
}

/// Open the target of a redirection with the mode its kind calls for.
///
/// `create_mode` only matters when the file is created.
pub fn open_target(
    kind: RedirectKind,
    path: &Path,
    create_mode: Mode,
) -> Result<OwnedFd, EvalError> {
    let raw = open(path, kind.open_flags(), create_mode).map_err(|source| EvalError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    trace!(path = %path.display(), fd = raw, kind = kind.as_str(), "opened redirection target");
    // SAFETY: `open` just returned this descriptor and nothing else owns it.
    Ok(unsafe { OwnedFd::from_raw_fd(raw) })
}

/// A standard descriptor together with a close-on-exec copy of what it
/// pointed at before being rebound.
#[derive(Debug)]
struct SavedStream {
    stream: RawFd,
    saved: OwnedFd,
}

impl SavedStream {
    fn save(stream: RawFd) -> Result<Self, EvalError> {
        let raw = fcntl(stream, FcntlArg::F_DUPFD_CLOEXEC(SAVED_FD_FLOOR))
            .map_err(|source| EvalError::Dup { fd: stream, source })?;
        Ok(Self {
            stream,
            // SAFETY: freshly duplicated descriptor, owned by nobody else.
            saved: unsafe { OwnedFd::from_raw_fd(raw) },
        })
    }

    fn restore(&self) -> Result<(), EvalError> {
        dup2(self.saved.as_raw_fd(), self.stream)
            .map(drop)
            .map_err(|source| EvalError::Restore {
                fd: self.stream,
                source,
            })
    }
}

/// Guard for a set of standard descriptors rebound onto one source.
#[derive(Debug)]
pub struct StdioOverride {
    saved: Vec<SavedStream>,
    restored: bool,
}

impl StdioOverride {
    /// Point each of `streams` at `source`, remembering the previous targets.
    ///
    /// On error, whatever was already rebound is put back before returning.
    pub fn install(source: RawFd, streams: &[RawFd]) -> Result<Self, EvalError> {
        let mut guard = Self {
            saved: Vec::with_capacity(streams.len()),
            restored: false,
        };

        for &stream in streams {
            guard.saved.push(SavedStream::save(stream)?);
        }

        for saved in &guard.saved {
            dup2(source, saved.stream).map_err(|err| EvalError::Redirect {
                fd: saved.stream,
                source: err,
            })?;
        }

        trace!(source, ?streams, "standard descriptors rebound");
        Ok(guard)
    }

    /// Put every rebound descriptor back and close the saved copies.
    ///
    /// All streams are attempted even if one fails; the first error wins.
    pub fn restore(mut self) -> Result<(), EvalError> {
        self.restored = true;
        self.restore_all()
    }

    fn restore_all(&self) -> Result<(), EvalError> {
        let mut first_err = None;
        for saved in &self.saved {
            if let Err(err) = saved.restore() {
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Drop for StdioOverride {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(err) = self.restore_all() {
            warn!(error = %err, "failed to restore standard descriptors");
        }
    }
}
