//! Expression parser.
//!
//! A hand-written recursive-descent parser implementing operator
//! precedence as a recursion ladder (OR → AND → comparison → additive →
//! multiplicative → unary/group → value), with single-token lookahead to
//! distinguish function calls from bare identities and clean termination
//! at clause boundaries (`FROM`, `AS`, `LIMIT`, `SELECT`, top-level
//! commas, end of statement).
//!
//! Errors are threaded through every descent method as `Result` and
//! surface from [`Tree::build_tree`], which clears the root on failure:
//! a parse yields either a valid tree or a single descriptive error,
//! never both, never a partial tree.

mod error;
mod pager;
mod tree;

pub use error::ParseError;
pub use pager::{LexTokenPager, TokenPager};
pub use tree::{parse_expression, Tree};
