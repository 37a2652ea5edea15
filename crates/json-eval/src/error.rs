//! Error taxonomy: JSON parse, expression parse, and evaluation failures.

use crate::types::{BinaryOp, Func};
use std::fmt;
use thiserror::Error;

/// Malformed JSON input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum JsonParseError {
    #[error("JSON document is less than 2 characters")]
    TooShort,
    #[error("missing object opening curly brace '{{'")]
    MissingOpeningBrace,
    #[error("missing opening quotation mark '\"'")]
    MissingQuote,
    #[error("missing string closing quotation mark '\"'")]
    UnterminatedString,
    #[error("unexpected escape sequence '\\{0}'")]
    BadEscape(char),
    #[error("invalid '\\u' escape sequence")]
    BadUnicodeEscape,
    #[error("invalid key syntax for key '{0}'")]
    InvalidKey(String),
    #[error("duplicate key '{0}'")]
    DuplicateKey(String),
    #[error("missing ':' between key and value")]
    MissingColon,
    #[error("missing ',' after value")]
    MissingComma,
    #[error("unexpected ',' after last value")]
    TrailingComma,
    #[error("negative sign should be followed by a digit")]
    BareMinus,
    #[error("integer literal out of 64-bit range")]
    IntegerOverflow,
    #[error("invalid literal")]
    InvalidLiteral,
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected content after top-level object")]
    TrailingContent,
}

/// Malformed expression syntax.
///
/// Carries the full expression text and the byte offset of the offending
/// character; `Display` renders the message with a caret under the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprParseError {
    pub message: String,
    pub expression: String,
    pub pos: usize,
}

impl ExprParseError {
    pub fn new(message: impl Into<String>, expression: &str, pos: usize) -> Self {
        Self {
            message: message.into(),
            expression: expression.to_string(),
            pos,
        }
    }
}

impl fmt::Display for ExprParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        writeln!(f, "{}", self.expression)?;
        let column = self
            .expression
            .get(..self.pos)
            .map(|s| s.chars().count())
            .unwrap_or(self.pos);
        for _ in 0..column {
            f.write_str(" ")?;
        }
        f.write_str("^")
    }
}

impl std::error::Error for ExprParseError {}

/// One step of a document path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    Key(String),
    Index(i64),
}

/// Document path assembled while an evaluation error unwinds.
///
/// Renders as `a.b[3].c`: keys joined with dots, indexes in brackets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Breadcrumb(Vec<PathComponent>);

impl Breadcrumb {
    pub fn key(name: impl Into<String>) -> Self {
        Self(vec![PathComponent::Key(name.into())])
    }

    pub fn index(index: i64) -> Self {
        Self(vec![PathComponent::Index(index)])
    }

    pub fn components(&self) -> &[PathComponent] {
        &self.0
    }

    fn prepend(&mut self, component: PathComponent) {
        self.0.insert(0, component);
    }
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            match component {
                PathComponent::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathComponent::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Evaluation failure.
///
/// Location-bearing variants carry a [`Breadcrumb`]; each unwinding frame of
/// the evaluator prepends its own path component, so the surfaced error
/// names the exact failing spot in the document.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("no such key '{0}'")]
    NoSuchKey(Breadcrumb),
    #[error("'{0}' should be an object")]
    NotAnObject(Breadcrumb),
    #[error("'{0}' should be an array")]
    NotAnArray(Breadcrumb),
    #[error("index out of range at '{path}': array has {len} element(s)")]
    OutOfBounds { path: Breadcrumb, len: usize },
    #[error("subscript should evaluate to an integer, got {0}")]
    NotAnIndex(&'static str),
    #[error("arguments to {func}() should be numbers, got {got}")]
    NonNumericArgument { func: Func, got: &'static str },
    #[error("operands of '{op}' should be numbers, got {got}")]
    NonNumericOperand { op: BinaryOp, got: &'static str },
    #[error("array passed to {0}() should not be empty")]
    EmptyArray(Func),
    #[error("{0}() takes exactly one argument")]
    WrongArity(Func),
    #[error("size() argument should be a string, array or object, got {0}")]
    NotSizable(&'static str),
    #[error("integer division by zero")]
    DivisionByZero,
}

impl EvalError {
    /// Prepend a path component to the breadcrumb, if this error carries
    /// one. Errors without a document location pass through unchanged.
    pub(crate) fn prepend(mut self, component: PathComponent) -> Self {
        match &mut self {
            EvalError::NoSuchKey(path)
            | EvalError::NotAnObject(path)
            | EvalError::NotAnArray(path)
            | EvalError::OutOfBounds { path, .. } => path.prepend(component),
            _ => {}
        }
        self
    }
}

/// Any failure from parsing a document, parsing an expression, or
/// evaluating one.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] JsonParseError),
    #[error(transparent)]
    Expr(#[from] ExprParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
