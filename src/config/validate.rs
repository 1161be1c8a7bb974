// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{MinishError, Result};
use crate::logging::parse_level_str;

/// Highest value `create_mode` may take (permission and special bits).
const MAX_CREATE_MODE: u32 = 0o7777;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::MinishError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.evaluator, raw.reaper, raw.log))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_evaluator(cfg)?;
    validate_log(cfg)?;
    Ok(())
}

fn validate_evaluator(cfg: &RawConfigFile) -> Result<()> {
    // on_resource_error is strongly typed and checked during deserialization.

    let mode = cfg.evaluator.create_mode;
    if mode > MAX_CREATE_MODE {
        return Err(MinishError::ConfigError(format!(
            "[evaluator].create_mode must be <= 0o7777 (got 0o{mode:o})"
        )));
    }

    Ok(())
}

fn validate_log(cfg: &RawConfigFile) -> Result<()> {
    if let Some(level) = &cfg.log.level {
        if parse_level_str(level).is_none() {
            return Err(MinishError::ConfigError(format!(
                "[log].level '{level}' is not one of error, warn, info, debug, trace"
            )));
        }
    }
    Ok(())
}
