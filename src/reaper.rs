// src/reaper.rs

//! Background-job reaper.
//!
//! Background nodes fork a child and never wait for it. Once it terminates it
//! stays a zombie until somebody collects it; the [`Reaper`] does that.
//!
//! It subscribes to SIGCHLD through tokio's signal stream. The signal handler
//! itself only records that the signal fired; the actual `waitpid` loop runs
//! in an ordinary task woken by the stream, never in signal context.
//!
//! The reaper must share a single-threaded runtime with the code that calls
//! the evaluator: evaluation is synchronous, so the drain can only run between
//! lines and never steals a child the evaluator is waiting for.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::errors::{MinishError, Result};
use crate::exec::ExitStatus;

/// How many reaped children are kept for [`Reaper::reaped`]; older entries
/// only count towards [`Reaper::reaped_count`].
pub const REAPED_HISTORY: usize = 64;

/// A child collected by the reaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReapedChild {
    pub pid: Pid,
    pub status: ExitStatus,
}

/// Collect every child that has already terminated, without blocking.
pub fn drain_terminated() -> Vec<ReapedChild> {
    let mut reaped = Vec::new();

    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => break,
            Ok(WaitStatus::Exited(pid, code)) => reaped.push(ReapedChild {
                pid,
                status: ExitStatus::from_code(code),
            }),
            Ok(WaitStatus::Signaled(pid, sig, _)) => reaped.push(ReapedChild {
                pid,
                status: ExitStatus::from_signal(sig),
            }),
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            // No children left at all.
            Err(Errno::ECHILD) => break,
            Err(err) => {
                warn!(error = %err, "waitpid failed while reaping");
                break;
            }
        }
    }

    for child in &reaped {
        warn!(pid = %child.pid, status = %child.status, "zombie process detected and reaped");
    }

    reaped
}

#[derive(Debug, Default)]
struct ReapHistory {
    total: usize,
    recent: VecDeque<ReapedChild>,
}

type ReapLog = Arc<Mutex<ReapHistory>>;

fn record(log: &ReapLog, children: Vec<ReapedChild>) {
    if children.is_empty() {
        return;
    }
    let mut history = log.lock().unwrap_or_else(PoisonError::into_inner);
    history.total += children.len();
    for child in children {
        if history.recent.len() == REAPED_HISTORY {
            history.recent.pop_front();
        }
        history.recent.push_back(child);
    }
}

/// Handle on the running reaper task.
///
/// Created with [`Reaper::start`], torn down with [`Reaper::stop`]. Dropping
/// the handle without stopping aborts the task.
#[derive(Debug)]
pub struct Reaper {
    reaped: ReapLog,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Reaper {
    /// Subscribe to SIGCHLD and spawn the drain task.
    ///
    /// Must be called from inside a current-thread tokio runtime; on a
    /// multi-thread runtime the drain could collect a child the evaluator is
    /// blocked waiting for, so that is rejected.
    pub fn start() -> Result<Self> {
        let flavor = Handle::try_current()
            .map_err(|e| {
                MinishError::ConfigError(format!("reaper needs a tokio runtime: {e}"))
            })?
            .runtime_flavor();
        if flavor != RuntimeFlavor::CurrentThread {
            return Err(MinishError::ConfigError(format!(
                "reaper requires a current-thread tokio runtime (got {flavor:?})"
            )));
        }

        let mut sigchld = signal(SignalKind::child())?;
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let reaped: ReapLog = Arc::new(Mutex::new(ReapHistory::default()));
        let log = Arc::clone(&reaped);

        let handle = tokio::spawn(async move {
            debug!("reaper started");
            loop {
                tokio::select! {
                    notified = sigchld.recv() => {
                        if notified.is_none() {
                            debug!("SIGCHLD stream closed");
                            break;
                        }
                        record(&log, drain_terminated());
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
            debug!("reaper stopped");
        });

        Ok(Self {
            reaped,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// The most recently collected children, oldest first (at most
    /// [`REAPED_HISTORY`]).
    pub fn reaped(&self) -> Vec<ReapedChild> {
        let history = self.reaped.lock().unwrap_or_else(PoisonError::into_inner);
        history.recent.iter().copied().collect()
    }

    /// Number of children collected over the reaper's lifetime.
    pub fn reaped_count(&self) -> usize {
        self.reaped
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .total
    }

    /// Stop the drain task, collect anything that finished in the meantime,
    /// and return the recent history (see [`Reaper::reaped`]).
    pub async fn stop(mut self) -> Vec<ReapedChild> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                warn!(error = %err, "reaper task ended abnormally");
            }
        }

        record(&self.reaped, drain_terminated());
        self.reaped()
    }
}

impl Drop for Reaper {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
