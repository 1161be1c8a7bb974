// tests/evaluator_sequencing.rs

mod common;
use crate::common::builders::{echo, exit_with, falsity, touch, truth};
use crate::common::{init_tracing, serial};

use minish::ast::Expr;
use minish::exec::ExitStatus;
use minish_test_utils::capture::capture;

#[test]
fn test_sequence_runs_both_and_returns_right_status() {
    init_tracing();
    let _guard = serial();

    let out = capture(&Expr::sequence(exit_with(4), echo(&["after"])));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert_eq!(out.stdout, "after\n");

    let out = capture(&Expr::sequence(truth(), exit_with(5)));
    assert_eq!(out.status.code(), 5);
}

#[test]
fn test_sequence_preserves_order() {
    let _guard = serial();

    let out = capture(&Expr::sequence(
        Expr::sequence(echo(&["one"]), echo(&["two"])),
        echo(&["three"]),
    ));

    assert_eq!(out.stdout, "one\ntwo\nthree\n");
}

#[test]
fn test_and_then_short_circuits_on_failure() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();
    let probe = dir.path().join("probe");

    let out = capture(&Expr::and_then(exit_with(2), touch(&probe)));

    assert_eq!(out.status.code(), 2);
    assert!(!probe.exists(), "right side must not run");
}

#[test]
fn test_and_then_runs_right_on_success() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();
    let probe = dir.path().join("probe");

    let out = capture(&Expr::and_then(truth(), touch(&probe)));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert!(probe.exists());

    let out = capture(&Expr::and_then(truth(), exit_with(7)));
    assert_eq!(out.status.code(), 7);
}

#[test]
fn test_or_else_short_circuits_on_success() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();
    let probe = dir.path().join("probe");

    let out = capture(&Expr::or_else(truth(), touch(&probe)));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert!(!probe.exists(), "right side must not run");
}

#[test]
fn test_or_else_runs_right_on_failure() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();
    let probe = dir.path().join("probe");

    let out = capture(&Expr::or_else(falsity(), touch(&probe)));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert!(probe.exists());

    let out = capture(&Expr::or_else(falsity(), exit_with(9)));
    assert_eq!(out.status.code(), 9);
}

#[test]
fn test_mixed_chain_matches_shell_semantics() {
    let _guard = serial();

    // (false && echo no) || echo yes
    let out = capture(&Expr::or_else(
        Expr::and_then(falsity(), echo(&["no"])),
        echo(&["yes"]),
    ));

    assert_eq!(out.status, ExitStatus::SUCCESS);
    assert_eq!(out.stdout, "yes\n");
    assert!(out.stdio_preserved);
}
