// src/script.rs

//! Loading expression trees from JSON scripts.
//!
//! A script is either one node object or an array of node objects, one per
//! line:
//!
//! ```json
//! [
//!   { "kind": "simple", "arguments": ["echo", "hello"] },
//!   { "kind": "pipe",
//!     "left":  { "kind": "simple", "arguments": ["echo", "x"] },
//!     "right": { "kind": "simple", "arguments": ["cat"] } }
//! ]
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::ast::{Expr, RawNode};
use crate::errors::{MinishError, Result};

/// Parse script text into validated lines.
pub fn parse_script(text: &str) -> Result<Vec<Expr>> {
    let value: Value = serde_json::from_str(text)?;

    let raw_lines: Vec<RawNode> = match value {
        Value::Array(_) => serde_json::from_value(value)?,
        other => vec![serde_json::from_value(other)?],
    };

    raw_lines
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            Expr::try_from(raw).map_err(|err| match err {
                MinishError::ScriptError(msg) => {
                    MinishError::ScriptError(format!("line {}: {msg}", idx + 1))
                }
                other => other,
            })
        })
        .collect()
}

/// Read and parse a script file. `-` reads standard input.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Expr>> {
    let path = path.as_ref();
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };

    let lines = parse_script(&text)?;
    debug!(path = %path.display(), lines = lines.len(), "script loaded");
    Ok(lines)
}
