//! Abstract syntax tree for expressions.

mod node;

pub use node::{
    BinaryNode, BinaryOp, FuncNode, IdentityNode, MultiArgNode, Node, NullNode, NumberNode,
    StringNode, TriNode, UnaryNode, UnaryOp,
};
