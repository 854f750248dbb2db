//! # ferric-expr
//!
//! A dialect-aware SQL expression engine: a recursive-descent expression
//! parser producing a typed AST, and a set of dialect writers that emit
//! the AST back into textual SQL variants.
//!
//! ## Parsing
//!
//! [`parse_expression`] lexes and parses a single expression with
//! semantic checking enabled, validating function names against the
//! process-wide [registry](crate::registry):
//!
//! ```
//! use ferric_expr::{parse_expression, registry};
//!
//! registry::load_all_builtins();
//!
//! let tree = parse_expression("5 * toint(item_name)").unwrap();
//! assert_eq!(tree.to_string(), "5 * toint(`item_name`)");
//! ```
//!
//! For embedded use, build a [`Tree`] over your own [`TokenPager`] and
//! call [`Tree::build_tree`] directly; passing `false` skips the
//! semantic check so unknown functions parse with synthetic descriptors.
//!
//! ## Emission
//!
//! Nodes serialize through a [`DialectWriter`]. Writers differ only in
//! quoting rules and null spelling; transformation writers compose over
//! a base writer:
//!
//! ```
//! use ferric_expr::{new_fingerprinter, parse_expression, registry, DialectWriter};
//!
//! registry::load_all_builtins();
//!
//! let tree = parse_expression("name IN (\"a\", \"b\", \"c\")").unwrap();
//! let mut w = new_fingerprinter();
//! tree.root().unwrap().write_dialect(&mut w);
//! assert_eq!(w.as_str(), "`name` IN (?, ?, ?)");
//! ```
//!
//! ## Grammar
//!
//! Arithmetic, boolean logic, comparisons, `BETWEEN … AND …`, `IN (…)`,
//! unary negation, parenthesized groups (preserved across round-trips),
//! function calls with arbitrary nested argument expressions, identifier
//! references (optionally qualified), literals, and the `*` wildcard.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod value;
pub mod writer;

pub use ast::{BinaryOp, Node, UnaryOp};
pub use lexer::{LexDialect, Lexer, Span, Token, TokenKind};
pub use parser::{parse_expression, LexTokenPager, ParseError, TokenPager, Tree};
pub use registry::{empty_eval_func, load_all_builtins, ContextReader, FuncDesc};
pub use value::Value;
pub use writer::{
    new_default_no_namespace_writer, new_default_writer, new_dialect_writer,
    new_fingerprint_writer, new_fingerprinter, new_json_dialect_writer, new_keyword_dialect,
    DialectWriter,
};
