//! Query/expression engine over JSON documents.
//!
//! A document is parsed once into a typed value tree (integers and floats
//! kept apart, escapes decoded); path/arithmetic expressions such as
//! `a.b[c.d+1] + max(a.b[0], 3)` are then parsed and evaluated against it.
//! Member access narrows the context step by step, while subscript indexes
//! and function arguments always resolve against the whole document.
//! Evaluation errors carry a breadcrumb path (`a.b[3].c`) naming the exact
//! failing spot.
//!
//! # Example
//!
//! ```
//! use json_eval::Document;
//!
//! let doc = Document::parse(r#"{"a": {"b": [1, 2, {"c": "test"}, [11, 12]]}}"#).unwrap();
//!
//! let result = doc.evaluate("a.b[1] + max(a.b[0], 3)").unwrap();
//! assert_eq!(result.to_string(), "5");
//!
//! let result = doc.evaluate("a.b[2].c").unwrap();
//! assert_eq!(result.to_string(), "\"test\"");
//! ```

mod value;
pub use value::{Members, Value};

mod json;
pub use json::JsonParser;

mod types;
pub use types::{BinaryOp, Func, Node, SubscriptNode, SubscriptThen};

mod ast;
pub use ast::Ast;

mod parser;
pub use parser::ExprParser;

mod eval;
pub use eval::evaluate;

mod document;
pub use document::Document;

mod error;
pub use error::{Breadcrumb, Error, EvalError, ExprParseError, JsonParseError, PathComponent};

mod num;
