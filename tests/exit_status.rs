// tests/exit_status.rs

use std::process::ExitCode;

use nix::sys::signal::Signal;

use minish::exec::ExitStatus;

#[test]
fn test_success_and_failure() {
    assert!(ExitStatus::SUCCESS.is_success());
    assert!(!ExitStatus::FAILURE.is_success());
    assert_eq!(ExitStatus::default(), ExitStatus::SUCCESS);
}

#[test]
fn test_any_nonzero_code_is_failure() {
    for code in [1, 2, 126, 127, 255] {
        assert!(!ExitStatus::from_code(code).is_success(), "{code}");
    }
}

#[test]
fn test_signal_statuses() {
    assert_eq!(ExitStatus::from_signal(Signal::SIGTERM).code(), 143);
    assert_eq!(ExitStatus::from_signal(Signal::SIGKILL).code(), 137);
    assert_eq!(ExitStatus::from_signal(Signal::SIGPIPE).code(), 141);
}

#[test]
fn test_display_is_the_code() {
    assert_eq!(ExitStatus::NOT_FOUND.to_string(), "127");
    assert_eq!(ExitStatus::CANNOT_EXECUTE.to_string(), "126");
}

#[test]
fn test_exit_code_conversion() {
    // Only the low 8 bits reach the parent process.
    let same = |a: ExitCode, b: ExitCode| format!("{a:?}") == format!("{b:?}");
    assert!(same(ExitStatus::from_code(3).to_exit_code(), ExitCode::from(3)));
    assert!(same(ExitStatus::from_code(256 + 7).to_exit_code(), ExitCode::from(7)));
}
