// src/exec/status.rs

use std::fmt;
use std::process::ExitCode;

use nix::sys::signal::Signal;

/// Result of evaluating one node: `0` is success, anything else is failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExitStatus(i32);

impl ExitStatus {
    pub const SUCCESS: ExitStatus = ExitStatus(0);
    pub const FAILURE: ExitStatus = ExitStatus(1);
    /// The command exists but could not be executed (permissions, bad format).
    pub const CANNOT_EXECUTE: ExitStatus = ExitStatus(126);
    /// The command could not be resolved against `PATH`.
    pub const NOT_FOUND: ExitStatus = ExitStatus(127);

    const SIGNAL_BASE: i32 = 128;

    pub fn from_code(code: i32) -> Self {
        ExitStatus(code)
    }

    /// Status reported for a child killed by `signal`.
    pub fn from_signal(signal: Signal) -> Self {
        ExitStatus(Self::SIGNAL_BASE + signal as i32)
    }

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Process exit codes only carry the low 8 bits.
    pub fn to_exit_code(self) -> ExitCode {
        ExitCode::from((self.0 & 0xff) as u8)
    }
}

impl Default for ExitStatus {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
