#![allow(dead_code)]

use std::path::Path;

use minish::ast::{Expr, RedirectKind};
use minish::config::{ConfigFile, RawConfigFile};
use minish::types::FailurePolicy;

/// `words[0] words[1..]` as an external command (or built-in).
pub fn cmd(words: &[&str]) -> Expr {
    Expr::simple(words.iter().copied())
}

/// The `echo` built-in.
pub fn echo(args: &[&str]) -> Expr {
    Expr::simple(std::iter::once("echo").chain(args.iter().copied()))
}

/// `sh -c script`, for commands that need shell features of their own.
pub fn sh(script: &str) -> Expr {
    cmd(&["sh", "-c", script])
}

pub fn truth() -> Expr {
    cmd(&["true"])
}

pub fn falsity() -> Expr {
    cmd(&["false"])
}

/// A command that exits with `code`.
pub fn exit_with(code: i32) -> Expr {
    sh(&format!("exit {code}"))
}

/// A command that creates `path`, to observe whether a branch ran.
pub fn touch(path: &Path) -> Expr {
    Expr::simple(["touch".to_string(), path.display().to_string()])
}

pub fn redirect(kind: RedirectKind, target: &Path, body: Expr) -> Expr {
    Expr::redirect(kind, target, body)
}

/// `cat < dir/missing.txt`: fails with a resource error when opening the
/// target.
pub fn cat_missing(dir: &Path) -> Expr {
    redirect(RedirectKind::In, &dir.join("missing.txt"), cmd(&["cat"]))
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn on_resource_error(mut self, policy: FailurePolicy) -> Self {
        self.config.evaluator.on_resource_error = policy;
        self
    }

    pub fn create_mode(mut self, mode: u32) -> Self {
        self.config.evaluator.create_mode = mode;
        self
    }

    pub fn reaper(mut self, enabled: bool) -> Self {
        self.config.reaper.enabled = enabled;
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.log.level = Some(level.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
