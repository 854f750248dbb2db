//! Parser error types.

use thiserror::Error;

/// A parse error. One error per parse; there is no recovery after the
/// first failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The parser expected one of a set of token types and got another.
    #[error("expr: unexpected {found} in {context}")]
    UnexpectedToken {
        /// The offending token's text (or kind when it has none).
        found: String,
        /// The grammar context, e.g. `input` or `func`.
        context: &'static str,
        /// Byte offset of the offending token.
        pos: usize,
    },

    /// Strict mode: the function name is not in the registry.
    #[error("expr: non existent function {0}")]
    UnknownFunction(String),

    /// A number literal failed to parse into its numeric form.
    #[error("expr: malformed number literal {0}")]
    MalformedLiteral(String),

    /// A post-parse structural check failed (arity, invalid identity,
    /// missing list values).
    #[error("expr: {0}")]
    StructuralCheck(String),

    /// An unclosed group, call, or list.
    #[error("expr: missing right parenthesis at position {0}")]
    MissingRightParen(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_context_qualified() {
        let err = ParseError::UnknownFunction(String::from("no_such_fn"));
        assert_eq!(err.to_string(), "expr: non existent function no_such_fn");

        let err = ParseError::UnexpectedToken {
            found: String::from(")"),
            context: "input",
            pos: 3,
        };
        assert_eq!(err.to_string(), "expr: unexpected ) in input");
    }
}
