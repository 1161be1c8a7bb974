// src/engine/mod.rs

//! Driver-side runtime.
//!
//! Ties the evaluator to the reaper: lines are handed to the
//! [`Evaluator`](crate::exec::Evaluator) one at a time, and between lines the
//! runtime yields so the reaper task can collect finished background jobs.

/// Runtime options.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Start the SIGCHLD reaper alongside the evaluator.
    pub reaper: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self { reaper: true }
    }
}

pub mod runtime;

pub use runtime::Runtime;
