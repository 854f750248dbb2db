#![allow(dead_code)]

use ferric_expr::{
    new_fingerprinter, parse_expression, registry, DialectWriter, LexDialect, LexTokenPager,
    Lexer, Node, ParseError, Tree,
};

/// Strict parse; panics with the error on failure.
pub fn parse(input: &str) -> Tree<LexTokenPager<'_>> {
    registry::load_all_builtins();
    match parse_expression(input) {
        Ok(tree) => tree,
        Err(e) => panic!("failed to parse: {input}\nerror: {e}"),
    }
}

/// Strict parse expected to fail; returns the error.
pub fn parse_err(input: &str) -> ParseError {
    registry::load_all_builtins();
    match parse_expression(input) {
        Ok(tree) => panic!("expected parse error for: {input}, got: {tree}"),
        Err(e) => e,
    }
}

/// Lax parse: unknown functions get synthetic descriptors.
pub fn parse_lax(input: &str) -> Tree<LexTokenPager<'_>> {
    registry::load_all_builtins();
    let lexer = Lexer::new(input, LexDialect::Expression);
    let mut tree = Tree::new(LexTokenPager::new(lexer));
    if let Err(e) = tree.build_tree(false) {
        panic!("failed to parse lax: {input}\nerror: {e}");
    }
    tree
}

/// Strict parse, returning the root node.
pub fn root(input: &str) -> Node {
    match parse(input).into_root() {
        Some(node) => node,
        None => panic!("no root for: {input}"),
    }
}

/// Emits the parsed input through the given writer.
pub fn write_with<W: DialectWriter>(input: &str, mut w: W) -> String {
    let tree = parse(input);
    match tree.root() {
        Some(node) => node.write_dialect(&mut w),
        None => panic!("no root for: {input}"),
    }
    w.as_str().to_string()
}

/// Emits the parsed input as a query fingerprint.
pub fn fingerprint(input: &str) -> String {
    write_with(input, new_fingerprinter())
}

/// Verifies that emission is a fixed point: the first rendering
/// re-parses and renders to the same string again.
pub fn round_trip(input: &str) {
    let first = parse(input).to_string();
    let second = parse(&first).to_string();
    assert_eq!(
        first, second,
        "round-trip failed.\n  input:  {input}\n  first:  {first}\n  second: {second}"
    );
}
