// src/ast/raw.rs

//! Serialized node shape.
//!
//! Scripts describe each node as `{ kind, arguments, left, right }`. This is
//! deserialized into [`RawNode`] as-is and only then converted into an
//! [`Expr`], which is where the per-kind shape rules are checked.

use std::path::PathBuf;

use serde::Deserialize;

use crate::ast::{Expr, RedirectKind};
use crate::errors::{MinishError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub kind: String,

    #[serde(default)]
    pub arguments: Vec<String>,

    #[serde(default)]
    pub left: Option<Box<RawNode>>,

    #[serde(default)]
    pub right: Option<Box<RawNode>>,
}

impl TryFrom<RawNode> for Expr {
    type Error = MinishError;

    fn try_from(raw: RawNode) -> std::result::Result<Self, Self::Error> {
        let RawNode {
            kind,
            arguments,
            left,
            right,
        } = raw;

        let expr = match kind.as_str() {
            "empty" => {
                no_children(&kind, &left, &right)?;
                Expr::Empty
            }
            "simple" => {
                no_children(&kind, &left, &right)?;
                if arguments.is_empty() {
                    return Err(shape_error(&kind, "needs at least a command name in `arguments`"));
                }
                Expr::Simple(arguments)
            }
            "background" => {
                let left = only_left(&kind, left, right)?;
                Expr::Background(Box::new(left))
            }
            "sequence" | "and_then" | "or_else" | "pipe" => {
                let (l, r) = both_children(&kind, left, right)?;
                match kind.as_str() {
                    "sequence" => Expr::sequence(l, r),
                    "and_then" => Expr::and_then(l, r),
                    "or_else" => Expr::or_else(l, r),
                    _ => Expr::pipe(l, r),
                }
            }
            "redirect_in" | "redirect_out" | "redirect_append" | "redirect_err"
            | "redirect_err_and_out" => {
                let redirect = match kind.as_str() {
                    "redirect_in" => RedirectKind::In,
                    "redirect_out" => RedirectKind::Out,
                    "redirect_append" => RedirectKind::Append,
                    "redirect_err" => RedirectKind::Err,
                    _ => RedirectKind::ErrAndOut,
                };
                let target = arguments
                    .into_iter()
                    .next()
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| shape_error(&kind, "needs a target path in `arguments[0]`"))?;
                let body = only_left(&kind, left, right)?;
                Expr::redirect(redirect, PathBuf::from(target), body)
            }
            // Unknown kinds still load; evaluating them yields the
            // "not implemented" diagnostic.
            _ => Expr::Unsupported(kind),
        };

        Ok(expr)
    }
}

fn shape_error(kind: &str, what: &str) -> MinishError {
    MinishError::ScriptError(format!("`{kind}` node {what}"))
}

fn no_children(
    kind: &str,
    left: &Option<Box<RawNode>>,
    right: &Option<Box<RawNode>>,
) -> Result<()> {
    if left.is_some() || right.is_some() {
        return Err(shape_error(kind, "must not have `left`/`right` children"));
    }
    Ok(())
}

fn only_left(
    kind: &str,
    left: Option<Box<RawNode>>,
    right: Option<Box<RawNode>>,
) -> Result<Expr> {
    if right.is_some() {
        return Err(shape_error(kind, "must not have a `right` child"));
    }
    let left = left.ok_or_else(|| shape_error(kind, "needs a `left` child"))?;
    Expr::try_from(*left)
}

fn both_children(
    kind: &str,
    left: Option<Box<RawNode>>,
    right: Option<Box<RawNode>>,
) -> Result<(Expr, Expr)> {
    match (left, right) {
        (Some(l), Some(r)) => Ok((Expr::try_from(*l)?, Expr::try_from(*r)?)),
        _ => Err(shape_error(kind, "needs both `left` and `right` children")),
    }
}
