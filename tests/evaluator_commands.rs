// tests/evaluator_commands.rs

mod common;
use crate::common::builders::{cmd, exit_with, falsity, sh, truth};
use crate::common::{init_tracing, serial};

use minish::exec::ExitStatus;
use minish_test_utils::capture::capture;

#[test]
fn test_true_and_false() {
    init_tracing();
    let _guard = serial();

    assert_eq!(capture(&truth()).status, ExitStatus::SUCCESS);
    assert_eq!(capture(&falsity()).status, ExitStatus::FAILURE);
}

#[test]
fn test_exit_code_is_passed_through() {
    let _guard = serial();

    let out = capture(&exit_with(3));

    assert_eq!(out.status.code(), 3);
    assert!(!out.status.is_success());
    assert!(out.stdio_preserved);
}

#[test]
fn test_command_output_reaches_stdout() {
    let _guard = serial();

    let out = capture(&cmd(&["printf", "%s-%s", "a", "b"]));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert_eq!(out.stdout, "a-b");
}

#[test]
fn test_arguments_are_passed_verbatim() {
    let _guard = serial();

    let out = capture(&cmd(&["printf", "[%s]\\n", "one two", "", "$x"]));

    assert_eq!(out.stdout, "[one two]\n[]\n[$x]\n");
}

#[test]
fn test_missing_command_is_127() {
    let _guard = serial();

    let out = capture(&cmd(&["definitely-not-a-real-command-xyz"]));

    assert_eq!(out.status, ExitStatus::NOT_FOUND);
    assert!(out.stderr.contains("definitely-not-a-real-command-xyz: command not found"));
    assert!(out.completed);
    assert!(out.stdio_preserved);
}

#[test]
fn test_non_executable_path_is_126() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("not-executable.sh");
    std::fs::write(&script, "#!/bin/sh\necho hi\n").unwrap();

    let out = capture(&cmd(&[script.to_str().unwrap()]));

    assert_eq!(out.status, ExitStatus::CANNOT_EXECUTE);
    assert!(out.stderr.contains("not-executable.sh"));
}

#[test]
fn test_killed_by_signal_is_128_plus_signo() {
    let _guard = serial();

    let out = capture(&sh("kill -TERM $$"));

    assert_eq!(out.status.code(), 128 + 15);
    assert!(out.stdio_preserved);
}

#[test]
fn test_argument_with_nul_byte_is_rejected() {
    let _guard = serial();

    let out = capture(&cmd(&["echo-not-builtin", "a\0b"]));

    assert_eq!(out.status, ExitStatus::FAILURE);
    assert!(out.stderr.contains("NUL"));
}
