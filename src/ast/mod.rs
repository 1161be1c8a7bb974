// src/ast/mod.rs

//! Expression tree consumed by the evaluator.
//!
//! One `Expr` is one input line. Children are boxed and owned by their parent,
//! so a tree has no sharing and no cycles; the evaluator only ever borrows it.
//!
//! - [`raw`] holds the serialized (JSON) node shape and its validation into
//!   `Expr`.

pub mod raw;

use std::fmt;
use std::path::PathBuf;

pub use raw::RawNode;

/// Which standard stream(s) a redirection rebinds, and how the target is
/// opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectKind {
    /// `< file`: stdin from the file, read-only.
    In,
    /// `> file`: stdout to the file, created/truncated.
    Out,
    /// `>> file`: stdout to the file, created/appended.
    Append,
    /// `2> file`: stderr to the file, created/truncated.
    Err,
    /// `&> file`: stdout and stderr to the file, created/truncated.
    ErrAndOut,
}

impl RedirectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RedirectKind::In => "<",
            RedirectKind::Out => ">",
            RedirectKind::Append => ">>",
            RedirectKind::Err => "2>",
            RedirectKind::ErrAndOut => "&>",
        }
    }
}

/// A parsed command expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Blank line.
    Empty,
    /// Command name followed by its arguments.
    Simple(Vec<String>),
    /// `left &`
    Background(Box<Expr>),
    /// `left ; right`
    Sequence(Box<Expr>, Box<Expr>),
    /// `left && right`
    AndThen(Box<Expr>, Box<Expr>),
    /// `left || right`
    OrElse(Box<Expr>, Box<Expr>),
    /// `left | right`
    Pipe(Box<Expr>, Box<Expr>),
    /// `body <op> target`
    Redirect {
        kind: RedirectKind,
        target: PathBuf,
        body: Box<Expr>,
    },
    /// A node kind the evaluator has no implementation for (e.g. a subshell
    /// coming from a richer grammar). Carries the kind name for diagnostics.
    Unsupported(String),
}

impl Expr {
    pub fn simple<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::Simple(words.into_iter().map(Into::into).collect())
    }

    pub fn background(left: Expr) -> Self {
        Expr::Background(Box::new(left))
    }

    pub fn sequence(left: Expr, right: Expr) -> Self {
        Expr::Sequence(Box::new(left), Box::new(right))
    }

    pub fn and_then(left: Expr, right: Expr) -> Self {
        Expr::AndThen(Box::new(left), Box::new(right))
    }

    pub fn or_else(left: Expr, right: Expr) -> Self {
        Expr::OrElse(Box::new(left), Box::new(right))
    }

    pub fn pipe(left: Expr, right: Expr) -> Self {
        Expr::Pipe(Box::new(left), Box::new(right))
    }

    pub fn redirect(kind: RedirectKind, target: impl Into<PathBuf>, body: Expr) -> Self {
        Expr::Redirect {
            kind,
            target: target.into(),
            body: Box::new(body),
        }
    }

    /// Short name of the node kind, used in log fields.
    pub fn kind_name(&self) -> &str {
        match self {
            Expr::Empty => "empty",
            Expr::Simple(_) => "simple",
            Expr::Background(_) => "background",
            Expr::Sequence(..) => "sequence",
            Expr::AndThen(..) => "and_then",
            Expr::OrElse(..) => "or_else",
            Expr::Pipe(..) => "pipe",
            Expr::Redirect { kind, .. } => match kind {
                RedirectKind::In => "redirect_in",
                RedirectKind::Out => "redirect_out",
                RedirectKind::Append => "redirect_append",
                RedirectKind::Err => "redirect_err",
                RedirectKind::ErrAndOut => "redirect_err_and_out",
            },
            Expr::Unsupported(kind) => kind,
        }
    }
}

/// Renders the tree in shell-like syntax, fully parenthesised. Used by
/// `--dry-run` and in log lines.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Empty => Ok(()),
            Expr::Simple(words) => write!(f, "{}", words.join(" ")),
            Expr::Background(left) => write!(f, "({left}) &"),
            Expr::Sequence(l, r) => write!(f, "({l}) ; ({r})"),
            Expr::AndThen(l, r) => write!(f, "({l}) && ({r})"),
            Expr::OrElse(l, r) => write!(f, "({l}) || ({r})"),
            Expr::Pipe(l, r) => write!(f, "({l}) | ({r})"),
            Expr::Redirect { kind, target, body } => {
                write!(f, "({body}) {} {}", kind.as_str(), target.display())
            }
            Expr::Unsupported(kind) => write!(f, "<{kind}>"),
        }
    }
}
