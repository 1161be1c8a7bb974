// src/config/model.rs

use serde::Deserialize;

use crate::types::{FailurePolicy, DEFAULT_CREATE_MODE};

/// Configuration exactly as read from `Minish.toml`.
///
/// ```toml
/// [evaluator]
/// on_resource_error = "contain"
/// create_mode = 0o644
///
/// [reaper]
/// enabled = true
///
/// [log]
/// level = "warn"
/// ```
///
/// Every section is optional. Use `ConfigFile::try_from` (or
/// [`crate::config::load_and_validate`]) to get a checked [`ConfigFile`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub evaluator: EvaluatorSection,

    #[serde(default)]
    pub reaper: ReaperSection,

    #[serde(default)]
    pub log: LogSection,
}

/// `[evaluator]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluatorSection {
    /// `"contain"` (default) or `"abort"`.
    #[serde(default)]
    pub on_resource_error: FailurePolicy,

    /// Permission bits for files created by `>`, `>>`, `2>` and `&>`.
    #[serde(default = "default_create_mode")]
    pub create_mode: u32,
}

fn default_create_mode() -> u32 {
    DEFAULT_CREATE_MODE
}

impl Default for EvaluatorSection {
    fn default() -> Self {
        Self {
            on_resource_error: FailurePolicy::default(),
            create_mode: default_create_mode(),
        }
    }
}

/// `[reaper]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReaperSection {
    #[serde(default = "default_reaper_enabled")]
    pub enabled: bool,
}

fn default_reaper_enabled() -> bool {
    true
}

impl Default for ReaperSection {
    fn default() -> Self {
        Self {
            enabled: default_reaper_enabled(),
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogSection {
    /// Fallback log level when neither `--log-level` nor `MINISH_LOG` is set.
    #[serde(default)]
    pub level: Option<String>,
}

/// Validated configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub evaluator: EvaluatorSection,
    pub reaper: ReaperSection,
    pub log: LogSection,
}

impl ConfigFile {
    /// Build without validation. Only `TryFrom<RawConfigFile>` should call
    /// this.
    pub(crate) fn new_unchecked(
        evaluator: EvaluatorSection,
        reaper: ReaperSection,
        log: LogSection,
    ) -> Self {
        Self {
            evaluator,
            reaper,
            log,
        }
    }
}
