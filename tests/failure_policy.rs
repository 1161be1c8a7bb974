// tests/failure_policy.rs

mod common;
use crate::common::builders::{cat_missing, echo, ConfigFileBuilder};
use crate::common::{init_tracing, serial};

use minish::ast::Expr;
use minish::exec::{Evaluator, ExitStatus};
use minish::types::FailurePolicy;
use minish_test_utils::capture::capture_with;

#[test]
fn test_default_policy_is_contain() {
    assert_eq!(Evaluator::new().policy(), FailurePolicy::Contain);
    assert_eq!(FailurePolicy::default(), FailurePolicy::Contain);
}

#[test]
fn test_contain_turns_resource_error_into_failed_line() {
    init_tracing();
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();

    let evaluator = Evaluator::new().with_policy(FailurePolicy::Contain);
    let out = capture_with(&evaluator, &cat_missing(dir.path()));

    assert!(out.completed, "contain must return to the caller");
    assert_eq!(out.status, ExitStatus::FAILURE);
    assert!(out.stderr.contains("minish:"));
    assert!(out.stdio_preserved);
}

#[test]
fn test_abort_terminates_the_process() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();

    let evaluator = Evaluator::new().with_policy(FailurePolicy::Abort);
    let out = capture_with(
        &evaluator,
        &Expr::sequence(cat_missing(dir.path()), echo(&["unreachable"])),
    );

    assert!(!out.completed, "abort must not return to the caller");
    assert_eq!(out.status, ExitStatus::FAILURE);
    assert!(out.stdout.is_empty());
    assert!(out.stderr.contains("missing.txt"));
}

#[test]
fn test_abort_does_not_affect_command_failures() {
    let _guard = serial();

    let evaluator = Evaluator::new().with_policy(FailurePolicy::Abort);
    let out = capture_with(&evaluator, &Expr::simple(["false"]));

    assert!(out.completed);
    assert_eq!(out.status, ExitStatus::FAILURE);
}

#[test]
fn test_pipe_branch_errors_stay_in_the_child() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();

    // Even under abort, a resource error inside a forked branch only fails
    // that branch.
    let evaluator = Evaluator::new().with_policy(FailurePolicy::Abort);
    let out = capture_with(
        &evaluator,
        &Expr::pipe(echo(&["x"]), cat_missing(dir.path())),
    );

    assert!(out.completed);
    assert_eq!(out.status, ExitStatus::FAILURE);
    assert!(out.stderr.contains("missing.txt"));
}

#[test]
fn test_evaluator_from_config() {
    let cfg = ConfigFileBuilder::new()
        .on_resource_error(FailurePolicy::Abort)
        .build();

    assert_eq!(Evaluator::from_config(&cfg).policy(), FailurePolicy::Abort);
}
