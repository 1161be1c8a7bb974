// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Evaluation-time resource failures have their own type,
//! [`crate::exec::EvalError`], because they are handled by the evaluator's
//! failure policy rather than bubbled up to `main`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinishError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Script error: {0}")]
    ScriptError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MinishError>;
