//! Recursive-descent expression parser.
//!
//! Operator precedence is planned during the parse phase by a recursion
//! ladder; the deepest rule binds tightest:
//!
//! ```text
//! O  := A  { (|| | OR)  A }
//! A  := C  { (&& | AND) C }
//! C  := P  { (= | == | != | > | >= | < | <= | LIKE) P }
//!      | P  BETWEEN P AND P
//!      | P  IN '(' args ')'
//! P  := M  { (+ | -) M }
//! M  := F  { (* | / | %) F }
//! F  := v | '(' O ')' | (! | -) F
//! v  := number | string | identity | '*' | NULL | Func
//! Func := name '(' [ arg { ',' arg } ] ')'
//! arg  := O
//! ```

use std::fmt;

use tracing::{debug, warn};

use super::error::ParseError;
use super::pager::{LexTokenPager, TokenPager};
use crate::ast::{
    BinaryNode, BinaryOp, FuncNode, IdentityNode, MultiArgNode, Node, NullNode, NumberNode,
    StringNode, TriNode, UnaryNode, UnaryOp,
};
use crate::lexer::{LexDialect, Lexer, Token, TokenKind};
use crate::registry::{self, FuncDesc};

/// A single parsed expression: a root node plus the pager it was read
/// from. Built once by [`build_tree`], then read-only.
///
/// [`build_tree`]: Tree::build_tree
pub struct Tree<P: TokenPager> {
    pager: P,
    root: Option<Node>,
    run_check: bool,
}

/// Parses a single expression in the default expression dialect, with
/// semantic checking enabled.
///
/// ```
/// use ferric_expr::{parse_expression, registry};
///
/// registry::load_all_builtins();
/// let tree = parse_expression("5 * toint(item_name)").unwrap();
/// assert_eq!(tree.to_string(), "5 * toint(`item_name`)");
/// ```
pub fn parse_expression(text: &str) -> Result<Tree<LexTokenPager<'_>>, ParseError> {
    let lexer = Lexer::new(text, LexDialect::Expression);
    let pager = LexTokenPager::new(lexer);
    let mut tree = Tree::new(pager);
    tree.build_tree(true)?;
    Ok(tree)
}

impl<P: TokenPager> Tree<P> {
    /// Creates an empty tree over the given pager, for embedded use when
    /// the caller already owns one.
    pub fn new(pager: P) -> Self {
        Self {
            pager,
            root: None,
            run_check: false,
        }
    }

    /// The root node, present only after a successful build.
    #[must_use]
    pub const fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Consumes the tree and returns its root, releasing the pager.
    #[must_use]
    pub fn into_root(self) -> Option<Node> {
        self.root
    }

    /// Builds the tree from the pager's token stream.
    ///
    /// With `run_check` the parse is strict: unknown function names fail
    /// and the finished root is validated once via [`Node::check`]. On
    /// error the root stays cleared; the caller sees either a tree with
    /// a root or an error, never both.
    pub fn build_tree(&mut self, run_check: bool) -> Result<(), ParseError> {
        self.run_check = run_check;
        debug!(run_check, "building expression tree");
        let root = match self.o(0) {
            Ok(node) => node,
            Err(err) => {
                self.root = None;
                return Err(err);
            }
        };
        if run_check {
            if let Err(err) = root.check() {
                warn!(error = %err, "expression failed post-parse check");
                self.root = None;
                return Err(err);
            }
        }
        self.root = Some(root);
        Ok(())
    }

    fn unexpected(&self, token: &Token, context: &'static str) -> ParseError {
        warn!(token = %token, context, "unexpected token");
        ParseError::UnexpectedToken {
            found: token.to_string(),
            context,
            pos: token.span.start,
        }
    }

    /// Verifies the current token has the required type, without
    /// consuming it.
    fn expect(&mut self, expected: TokenKind, context: &'static str) -> Result<Token, ParseError> {
        let token = self.pager.cur();
        if token.kind != expected {
            return Err(self.unexpected(&token, context));
        }
        Ok(token)
    }

    /// Logical OR, plus clause termination and comment consumption.
    fn o(&mut self, depth: usize) -> Result<Node, ParseError> {
        let mut n = self.a(depth)?;
        loop {
            let tok = self.pager.cur();
            match tok.kind {
                TokenKind::LogicOr | TokenKind::Or => {
                    self.pager.next();
                    let right = self.a(depth + 1)?;
                    n = Node::Binary(BinaryNode {
                        op: BinaryOp::Or,
                        left: Box::new(n),
                        right: Box::new(right),
                        paren: false,
                        span: tok.span,
                    });
                }
                TokenKind::CommentSingleLine => {
                    // consume the "--" signifier as well as the comment body
                    self.pager.next();
                    self.pager.next();
                }
                TokenKind::Eof
                | TokenKind::Eos
                | TokenKind::From
                | TokenKind::Comma
                | TokenKind::If
                | TokenKind::As
                | TokenKind::Select
                | TokenKind::Limit => {
                    // indicators of end of current clause
                    return Ok(n);
                }
                _ => return Ok(n),
            }
        }
    }

    /// Logical AND.
    fn a(&mut self, depth: usize) -> Result<Node, ParseError> {
        let mut n = self.c(depth)?;
        loop {
            let tok = self.pager.cur();
            match tok.kind {
                TokenKind::LogicAnd | TokenKind::And => {
                    self.pager.next();
                    let right = self.c(depth + 1)?;
                    n = Node::Binary(BinaryNode {
                        op: BinaryOp::And,
                        left: Box::new(n),
                        right: Box::new(right),
                        paren: false,
                        span: tok.span,
                    });
                }
                _ => return Ok(n),
            }
        }
    }

    /// Comparison, BETWEEN, and IN.
    fn c(&mut self, depth: usize) -> Result<Node, ParseError> {
        let mut n = self.p(depth)?;
        loop {
            let tok = self.pager.cur();
            match tok.kind {
                TokenKind::Equal
                | TokenKind::EqualEqual
                | TokenKind::NotEqual
                | TokenKind::Gt
                | TokenKind::Ge
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Like => {
                    self.pager.next();
                    let right = self.p(depth + 1)?;
                    // from_token covers every kind matched above
                    let op = BinaryOp::from_token(tok.kind).unwrap_or(BinaryOp::Eq);
                    n = Node::Binary(BinaryNode {
                        op,
                        left: Box::new(n),
                        right: Box::new(right),
                        paren: false,
                        span: tok.span,
                    });
                }
                TokenKind::Between => {
                    // BETWEEN x AND y: the inner AND is a delimiter,
                    // not a conjunction
                    self.pager.next();
                    let low = self.p(depth)?;
                    self.expect(TokenKind::And, "input")?;
                    self.pager.next();
                    let high = self.p(depth + 1)?;
                    n = Node::Tri(TriNode {
                        first: Box::new(n),
                        second: Box::new(low),
                        third: Box::new(high),
                        span: tok.span,
                    });
                }
                TokenKind::In => {
                    self.pager.next();
                    return self.multi_arg(n, tok, depth);
                }
                _ => return Ok(n),
            }
        }
    }

    /// Additive.
    fn p(&mut self, depth: usize) -> Result<Node, ParseError> {
        let mut n = self.m(depth)?;
        loop {
            let tok = self.pager.cur();
            match tok.kind {
                TokenKind::Plus | TokenKind::Minus => {
                    self.pager.next();
                    let right = self.m(depth + 1)?;
                    let op = if tok.kind == TokenKind::Plus {
                        BinaryOp::Add
                    } else {
                        BinaryOp::Sub
                    };
                    n = Node::Binary(BinaryNode {
                        op,
                        left: Box::new(n),
                        right: Box::new(right),
                        paren: false,
                        span: tok.span,
                    });
                }
                _ => return Ok(n),
            }
        }
    }

    /// Multiplicative.
    fn m(&mut self, depth: usize) -> Result<Node, ParseError> {
        let mut n = self.f(depth)?;
        loop {
            let tok = self.pager.cur();
            match tok.kind {
                TokenKind::Star
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Modulus => {
                    self.pager.next();
                    let right = self.f(depth + 1)?;
                    let op = match tok.kind {
                        TokenKind::Divide => BinaryOp::Div,
                        TokenKind::Modulus => BinaryOp::Mod,
                        _ => BinaryOp::Mul,
                    };
                    n = Node::Binary(BinaryNode {
                        op,
                        left: Box::new(n),
                        right: Box::new(right),
                        paren: false,
                        span: tok.span,
                    });
                }
                _ => return Ok(n),
            }
        }
    }

    /// The parenthesized list of an IN expression. The tested operand is
    /// prepended to the argument list.
    fn multi_arg(&mut self, first: Node, op: Token, depth: usize) -> Result<Node, ParseError> {
        self.expect(TokenKind::LeftParen, "input")?;
        self.pager.next();
        let mut args = vec![first];
        loop {
            let tok = self.pager.cur();
            match tok.kind {
                TokenKind::RightParen => {
                    self.pager.next();
                    return Ok(Node::MultiArg(MultiArgNode {
                        args,
                        span: op.span,
                    }));
                }
                TokenKind::Comma => {
                    self.pager.next();
                }
                TokenKind::Eof | TokenKind::Eos => {
                    return Err(ParseError::MissingRightParen(tok.span.start));
                }
                _ => {
                    let n = self.o(depth)?;
                    args.push(n);
                }
            }
        }
    }

    /// Unary operators and parenthesized groups.
    fn f(&mut self, depth: usize) -> Result<Node, ParseError> {
        let tok = self.pager.cur();
        match tok.kind {
            TokenKind::UdfExpr
            | TokenKind::Integer
            | TokenKind::Float
            | TokenKind::Identity
            | TokenKind::Value
            | TokenKind::Star
            | TokenKind::Null
            | TokenKind::Question => self.v(depth),
            TokenKind::Negate | TokenKind::Minus => {
                self.pager.next();
                let arg = self.f(depth + 1)?;
                let op = if tok.kind == TokenKind::Minus {
                    UnaryOp::Neg
                } else {
                    UnaryOp::Not
                };
                Ok(Node::Unary(UnaryNode {
                    op,
                    arg: Box::new(arg),
                    span: tok.span,
                }))
            }
            TokenKind::LeftParen => {
                self.pager.next();
                let mut n = self.o(depth + 1)?;
                // a group raises the inner expression's paren flag so
                // round-trips preserve the grouping
                if let Node::Binary(ref mut bn) = n {
                    bn.paren = true;
                }
                let close = self.pager.cur();
                if close.kind != TokenKind::RightParen {
                    return Err(ParseError::MissingRightParen(close.span.start));
                }
                self.pager.next();
                Ok(n)
            }
            _ => Err(self.unexpected(&tok, "input")),
        }
    }

    /// Values: literals, identities, the `*` wildcard, and function
    /// calls. A name token is a function call iff the next token is `(`.
    fn v(&mut self, depth: usize) -> Result<Node, ParseError> {
        let tok = self.pager.cur();
        match tok.kind {
            TokenKind::Integer | TokenKind::Float => {
                let n = NumberNode::new(tok.span, tok.value)?;
                self.pager.next();
                Ok(Node::Number(n))
            }
            TokenKind::Value | TokenKind::Star | TokenKind::Question => {
                self.pager.next();
                Ok(Node::String(StringNode {
                    text: tok.value,
                    span: tok.span,
                }))
            }
            TokenKind::Null => {
                self.pager.next();
                Ok(Node::Null(NullNode { span: tok.span }))
            }
            TokenKind::Identity | TokenKind::UdfExpr => {
                if self.pager.peek().kind == TokenKind::LeftParen {
                    return self.func(depth, tok);
                }
                self.pager.next();
                Ok(Node::Identity(IdentityNode::new(tok.span, tok.value)))
            }
            _ => Err(self.unexpected(&tok, "input")),
        }
    }

    /// A function invocation. Arguments parse at the top grammar level;
    /// an operator following a parsed value continues the expression, so
    /// `f(a > b)` and `f(a, b > c)` are both valid.
    fn func(&mut self, depth: usize, tok: Token) -> Result<Node, ParseError> {
        let name = tok.value.clone();
        let desc = match registry::lookup(&name) {
            Some(desc) => desc,
            None => {
                if self.run_check {
                    warn!(name = %name, "unknown function");
                    return Err(ParseError::UnknownFunction(name));
                }
                // keep the AST well-formed for pure syntactic tooling
                FuncDesc::synthetic(&name)
            }
        };

        self.pager.next(); // step to the left paren
        self.expect(TokenKind::LeftParen, "func")?;

        let mut fnode = FuncNode {
            name,
            desc,
            args: Vec::new(),
            span: tok.span,
        };
        loop {
            self.pager.next(); // consume '(' or the argument separator
            let first = self.pager.cur();
            let node = match first.kind {
                TokenKind::RightParen => {
                    self.pager.next();
                    return Ok(Node::Func(fnode));
                }
                TokenKind::Eof | TokenKind::Eos | TokenKind::From => {
                    return Ok(Node::Func(fnode));
                }
                _ => self.o(depth + 1)?,
            };

            let after = self.pager.cur();
            match after.kind {
                TokenKind::Comma => {
                    fnode.args.push(node);
                }
                TokenKind::RightParen => {
                    fnode.args.push(node);
                    self.pager.next();
                    return Ok(Node::Func(fnode));
                }
                TokenKind::Eof | TokenKind::Eos | TokenKind::From => {
                    fnode.args.push(node);
                    self.pager.next();
                    return Ok(Node::Func(fnode));
                }
                TokenKind::Equal
                | TokenKind::EqualEqual
                | TokenKind::NotEqual
                | TokenKind::Gt
                | TokenKind::Ge
                | TokenKind::Le
                | TokenKind::Lt
                | TokenKind::Star
                | TokenKind::Multiply
                | TokenKind::Divide => {
                    // residual operator after a bare value: the argument
                    // is an expression, re-enter the top rule
                    let n = self.o(depth + 1)?;
                    fnode.args.push(n);
                }
                _ => return Err(self.unexpected(&after, "func")),
            }
        }
    }
}

impl<P: TokenPager> fmt::Display for Tree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{root}"),
            None => Ok(()),
        }
    }
}
