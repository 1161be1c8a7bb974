use serde::Deserialize;

/// What the top level does when evaluation hits an OS-resource failure
/// (fork, pipe, dup, open or wait failing).
///
/// - `Contain`: report the failure, treat the current line as failed (exit
///   status 1) and keep going with the next line (default behaviour).
/// - `Abort`: report the failure and terminate the whole process, the way a
///   classic fail-fast shell core does.
///
/// Inside forked branches (pipeline halves, background jobs) the failure is
/// always contained to that child process, whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    Contain,
    Abort,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Contain
    }
}

/// Permission bits given to files created by output redirections, before the
/// process umask is applied.
pub const DEFAULT_CREATE_MODE: u32 = 0o644;
