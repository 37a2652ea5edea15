//! Parse-once, evaluate-many facade.

use crate::error::Error;
use crate::eval;
use crate::json::JsonParser;
use crate::parser::ExprParser;
use crate::value::{Members, Value};

/// A parsed JSON document that expressions are evaluated against.
///
/// The value tree is immutable after parsing, so one document can serve any
/// number of `evaluate` calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Members,
}

impl Document {
    /// Parse a document from JSON text. The top level must be an object.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(Self {
            root: JsonParser::parse(text)?,
        })
    }

    /// Parse and evaluate one expression against the document.
    pub fn evaluate(&self, expression: &str) -> Result<Value, Error> {
        let ast = ExprParser::parse(expression)?;
        Ok(eval::evaluate(&self.root, &ast)?)
    }

    /// The document's top-level object.
    pub fn root(&self) -> &Members {
        &self.root
    }
}
