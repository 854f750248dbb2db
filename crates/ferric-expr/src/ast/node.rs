//! Expression AST node model.
//!
//! A closed family of node variants, each carrying its source span and
//! three capabilities: canonical text via a dialect writer (double
//! dispatch), a debug form, and structural self-validation.

use std::fmt;

use crate::lexer::{Span, TokenKind};
use crate::parser::ParseError;
use crate::registry::FuncDesc;
use crate::writer::{new_default_writer, DialectWriter};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Like,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    ///
    /// Emission is canonical: `&&` and `==` in source re-emit as `AND`
    /// and `=`, which lex back to the same operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Like => "LIKE",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Maps an operator token to its binary operator.
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            TokenKind::Star | TokenKind::Multiply => Some(Self::Mul),
            TokenKind::Divide => Some(Self::Div),
            TokenKind::Modulus => Some(Self::Mod),
            TokenKind::Equal | TokenKind::EqualEqual => Some(Self::Eq),
            TokenKind::NotEqual => Some(Self::Ne),
            TokenKind::Gt => Some(Self::Gt),
            TokenKind::Ge => Some(Self::Ge),
            TokenKind::Lt => Some(Self::Lt),
            TokenKind::Le => Some(Self::Le),
            TokenKind::Like => Some(Self::Like),
            TokenKind::And | TokenKind::LogicAnd => Some(Self::And),
            TokenKind::Or | TokenKind::LogicOr => Some(Self::Or),
            _ => None,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation (`-`).
    Neg,
    /// Logical negation (`!` / `NOT`).
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT",
        }
    }
}

/// A numeric literal, preserving its original textual form.
#[derive(Debug, Clone)]
pub struct NumberNode {
    /// The source text of the number.
    pub text: String,
    /// True for floats, false for integers.
    pub is_float: bool,
    /// Parsed integer form (zero for floats).
    pub int_val: i64,
    /// Parsed floating form.
    pub float_val: f64,
    /// Source location.
    pub span: Span,
}

impl NumberNode {
    /// Parses the source text into a number node.
    pub fn new(span: Span, text: impl Into<String>) -> Result<Self, ParseError> {
        let text = text.into();
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Self {
                float_val: i as f64,
                int_val: i,
                is_float: false,
                text,
                span,
            });
        }
        match text.parse::<f64>() {
            Ok(f) => Ok(Self {
                float_val: f,
                int_val: 0,
                is_float: true,
                text,
                span,
            }),
            Err(_) => Err(ParseError::MalformedLiteral(text)),
        }
    }
}

/// A string literal (unescaped). Also carries the bare `*` wildcard and
/// `?` placeholders, which writers pass through.
#[derive(Debug, Clone)]
pub struct StringNode {
    /// The literal text.
    pub text: String,
    /// Source location.
    pub span: Span,
}

/// An identifier reference, possibly qualified (`users.email`).
#[derive(Debug, Clone)]
pub struct IdentityNode {
    /// The full dotted text.
    pub text: String,
    /// Source location.
    pub span: Span,
}

impl IdentityNode {
    /// Creates an identity node.
    #[must_use]
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// Splits on the first dot into an optional left qualifier and the
    /// right identifier.
    #[must_use]
    pub fn left_right(&self) -> (Option<&str>, &str) {
        match self.text.split_once('.') {
            Some((l, r)) => (Some(l), r),
            None => (None, self.text.as_str()),
        }
    }
}

/// The NULL literal.
#[derive(Debug, Clone)]
pub struct NullNode {
    /// Source location.
    pub span: Span,
}

/// A unary expression.
#[derive(Debug, Clone)]
pub struct UnaryNode {
    /// The operator.
    pub op: UnaryOp,
    /// The operand.
    pub arg: Box<Node>,
    /// Source location of the operator.
    pub span: Span,
}

/// A binary expression.
#[derive(Debug, Clone)]
pub struct BinaryNode {
    /// The operator.
    pub op: BinaryOp,
    /// Left operand.
    pub left: Box<Node>,
    /// Right operand.
    pub right: Box<Node>,
    /// True when the source grouped this subexpression in parentheses;
    /// emission restores them.
    pub paren: bool,
    /// Source location of the operator.
    pub span: Span,
}

/// A `BETWEEN` expression: `first BETWEEN second AND third`. The inner
/// `AND` is a structural delimiter, not a conjunction.
#[derive(Debug, Clone)]
pub struct TriNode {
    /// The tested expression.
    pub first: Box<Node>,
    /// Lower bound.
    pub second: Box<Node>,
    /// Upper bound.
    pub third: Box<Node>,
    /// Source location of the operator.
    pub span: Span,
}

/// An `IN` expression: `args[0] IN (args[1..])`.
#[derive(Debug, Clone)]
pub struct MultiArgNode {
    /// The tested expression followed by the list values.
    pub args: Vec<Node>,
    /// Source location of the operator.
    pub span: Span,
}

/// A function invocation.
#[derive(Debug, Clone)]
pub struct FuncNode {
    /// The function name as written.
    pub name: String,
    /// The resolved descriptor; synthetic in lax mode.
    pub desc: FuncDesc,
    /// Ordered argument expressions.
    pub args: Vec<Node>,
    /// Source location of the name.
    pub span: Span,
}

/// An expression AST node.
#[derive(Debug, Clone)]
pub enum Node {
    /// Numeric literal.
    Number(NumberNode),
    /// String literal.
    String(StringNode),
    /// Identifier reference.
    Identity(IdentityNode),
    /// NULL literal.
    Null(NullNode),
    /// Unary expression.
    Unary(UnaryNode),
    /// Binary expression.
    Binary(BinaryNode),
    /// BETWEEN expression.
    Tri(TriNode),
    /// IN expression.
    MultiArg(MultiArgNode),
    /// Function invocation.
    Func(FuncNode),
}

impl Node {
    /// Returns the source span of this node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Number(n) => n.span,
            Self::String(n) => n.span,
            Self::Identity(n) => n.span,
            Self::Null(n) => n.span,
            Self::Unary(n) => n.span,
            Self::Binary(n) => n.span,
            Self::Tri(n) => n.span,
            Self::MultiArg(n) => n.span,
            Self::Func(n) => n.span,
        }
    }

    /// Serializes this node through the given dialect writer.
    pub fn write_dialect(&self, w: &mut dyn DialectWriter) {
        match self {
            Self::Number(n) => w.write_number(&n.text),
            Self::String(n) => w.write_literal(&n.text),
            Self::Identity(n) => match n.left_right() {
                (Some(left), right) => w.write_left_right_identity(left, right),
                (None, text) => w.write_identity(text),
            },
            Self::Null(_) => w.write_null(),
            Self::Unary(n) => {
                match n.op {
                    UnaryOp::Neg => w.write_raw("-"),
                    UnaryOp::Not => w.write_raw("NOT "),
                }
                n.arg.write_dialect(w);
            }
            Self::Binary(n) => {
                if n.paren {
                    w.write_raw("(");
                }
                n.left.write_dialect(w);
                w.write_raw(" ");
                w.write_raw(n.op.as_str());
                w.write_raw(" ");
                n.right.write_dialect(w);
                if n.paren {
                    w.write_raw(")");
                }
            }
            Self::Tri(n) => {
                n.first.write_dialect(w);
                w.write_raw(" BETWEEN ");
                n.second.write_dialect(w);
                w.write_raw(" AND ");
                n.third.write_dialect(w);
            }
            Self::MultiArg(n) => {
                if let Some((first, rest)) = n.args.split_first() {
                    first.write_dialect(w);
                    w.write_raw(" IN (");
                    for (i, arg) in rest.iter().enumerate() {
                        if i > 0 {
                            w.write_raw(", ");
                        }
                        arg.write_dialect(w);
                    }
                    w.write_raw(")");
                }
            }
            Self::Func(n) => {
                w.write_raw(&n.name);
                w.write_raw("(");
                for (i, arg) in n.args.iter().enumerate() {
                    if i > 0 {
                        w.write_raw(", ");
                    }
                    arg.write_dialect(w);
                }
                w.write_raw(")");
            }
        }
    }

    /// Validates this node and its children against the structural
    /// invariants of each variant.
    pub fn check(&self) -> Result<(), ParseError> {
        match self {
            Self::Number(_) | Self::String(_) | Self::Null(_) => Ok(()),
            Self::Identity(n) => {
                let (left, right) = n.left_right();
                if right.is_empty() || left.is_some_and(str::is_empty) {
                    return Err(ParseError::StructuralCheck(format!(
                        "invalid identity {:?}",
                        n.text
                    )));
                }
                Ok(())
            }
            Self::Unary(n) => n.arg.check(),
            Self::Binary(n) => {
                n.left.check()?;
                n.right.check()
            }
            Self::Tri(n) => {
                n.first.check()?;
                n.second.check()?;
                n.third.check()
            }
            Self::MultiArg(n) => {
                if n.args.len() < 2 {
                    return Err(ParseError::StructuralCheck(String::from(
                        "IN requires at least one list value",
                    )));
                }
                for arg in &n.args {
                    arg.check()?;
                }
                Ok(())
            }
            Self::Func(n) => {
                n.desc.validate_arity(n.args.len())?;
                for arg in &n.args {
                    arg.check()?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = new_default_writer();
        self.write_dialect(&mut w);
        f.write_str(w.as_str())
    }
}
