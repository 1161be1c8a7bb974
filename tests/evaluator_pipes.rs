// tests/evaluator_pipes.rs

mod common;
use crate::common::builders::{cmd, echo, exit_with, falsity, sh, truth};
use crate::common::{init_tracing, serial};

use minish::ast::Expr;
use minish::exec::ExitStatus;
use minish_test_utils::capture::capture;

#[test]
fn test_echo_into_cat() {
    init_tracing();
    let _guard = serial();

    let out = capture(&Expr::pipe(echo(&["x"]), cmd(&["cat"])));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert_eq!(out.stdout, "x\n");
    assert!(out.stdio_preserved);
}

#[test]
fn test_status_is_downstream_status() {
    let _guard = serial();

    let out = capture(&Expr::pipe(truth(), falsity()));
    assert_eq!(out.status, ExitStatus::FAILURE);

    let out = capture(&Expr::pipe(exit_with(3), truth()));
    assert_eq!(out.status, ExitStatus::SUCCESS);
}

#[test]
fn test_three_stage_pipeline() {
    let _guard = serial();

    // (printf | sort) | head -n 1, as the tree nests left.
    let out = capture(&Expr::pipe(
        Expr::pipe(cmd(&["printf", "b\\na\\nc\\n"]), cmd(&["sort"])),
        cmd(&["head", "-n", "1"]),
    ));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert_eq!(out.stdout, "a\n");
}

#[test]
fn test_payload_larger_than_pipe_buffer() {
    let _guard = serial();

    // Deadlocks unless the parent waits only after both sides are running and
    // has dropped its own copies of the pipe ends.
    let out = capture(&Expr::pipe(
        cmd(&["seq", "1", "100000"]),
        cmd(&["wc", "-l"]),
    ));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert_eq!(out.stdout.trim(), "100000");
}

#[test]
fn test_reader_sees_eof_when_writer_finishes() {
    let _guard = serial();

    let out = capture(&Expr::pipe(truth(), cmd(&["cat"])));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert!(out.stdout.is_empty());
}

#[test]
fn test_early_exiting_reader_does_not_hang() {
    let _guard = serial();

    let out = capture(&Expr::pipe(cmd(&["yes"]), cmd(&["head", "-n", "2"])));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert_eq!(out.stdout, "y\ny\n");
}

#[test]
fn test_pipe_only_rebinds_stdout() {
    let _guard = serial();

    let out = capture(&Expr::pipe(
        sh("echo to-pipe; echo to-stderr >&2"),
        cmd(&["cat"]),
    ));

    assert_eq!(out.stdout, "to-pipe\n");
    assert_eq!(out.stderr, "to-stderr\n");
}

#[test]
fn test_compound_branches() {
    let _guard = serial();

    let out = capture(&Expr::pipe(
        Expr::sequence(echo(&["one"]), echo(&["two"])),
        cmd(&["wc", "-l"]),
    ));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert_eq!(out.stdout.trim(), "2");
}
