//! Tests for function invocation: detection, resolution, argument
//! parsing, and strict vs lax mode.

mod common;
use common::*;

use ferric_expr::ast::{BinaryNode, BinaryOp, FuncNode, Node};
use ferric_expr::ParseError;

// ===================================================================
// Detection and argument parsing
// ===================================================================

#[test]
fn function_call_with_identity_argument() {
    let n = root("5 * toint(item_name)");
    let Node::Binary(BinaryNode {
        op: BinaryOp::Mul,
        left,
        right,
        ..
    }) = n
    else {
        panic!("expected Mul at the top");
    };
    assert_eq!(left.to_string(), "5");
    let Node::Func(FuncNode { name, args, .. }) = right.as_ref() else {
        panic!("expected Func");
    };
    assert_eq!(name, "toint");
    assert_eq!(args.len(), 1);
    assert_eq!(args[0].to_string(), "`item_name`");

    assert_eq!(parse("5 * toint(item_name)").to_string(), "5 * toint(`item_name`)");
}

#[test]
fn name_without_paren_is_an_identity() {
    let n = root("toint");
    assert!(matches!(n, Node::Identity(_)));
}

#[test]
fn name_with_spaced_paren_is_still_a_call() {
    let n = root("toint (x)");
    assert!(matches!(n, Node::Func(_)));
}

#[test]
fn zero_argument_function() {
    let n = root("now()");
    let Node::Func(FuncNode { args, .. }) = n else {
        panic!("expected Func");
    };
    assert!(args.is_empty());
    assert_eq!(parse("now()").to_string(), "now()");
}

#[test]
fn nested_function_calls() {
    assert_eq!(
        parse("toint(tostring(5))").to_string(),
        "toint(tostring(5))"
    );
    round_trip("toint(tostring(5))");
}

#[test]
fn wildcard_in_argument_position() {
    let n = root("count(*)");
    let Node::Func(FuncNode { args, .. }) = n else {
        panic!("expected Func");
    };
    assert_eq!(args.len(), 1);
    assert_eq!(parse("count(*)").to_string(), "count(*)");
    round_trip("count(*)");
}

#[test]
fn comparison_expression_as_single_argument() {
    // the argument loop re-enters the top grammar rule, so a
    // comparison after a bare value continues the expression
    let n = root("exists(a > b)");
    let Node::Func(FuncNode { args, .. }) = n else {
        panic!("expected Func");
    };
    assert_eq!(args.len(), 1);
    assert!(matches!(
        &args[0],
        Node::Binary(BinaryNode {
            op: BinaryOp::Gt,
            ..
        })
    ));
    round_trip("exists(a > b)");
}

#[test]
fn expression_after_plain_argument() {
    let n = root("oneof(a, b > c)");
    let Node::Func(FuncNode { args, .. }) = n else {
        panic!("expected Func");
    };
    assert_eq!(args.len(), 2);
    assert_eq!(args[0].to_string(), "`a`");
    assert!(matches!(
        &args[1],
        Node::Binary(BinaryNode {
            op: BinaryOp::Gt,
            ..
        })
    ));
}

#[test]
fn arithmetic_argument() {
    let n = root("toint(qty * 5)");
    let Node::Func(FuncNode { args, .. }) = n else {
        panic!("expected Func");
    };
    assert_eq!(args[0].to_string(), "`qty` * 5");
}

#[test]
fn function_as_operand() {
    assert_eq!(
        parse("toint(a) + toint(b)").to_string(),
        "toint(`a`) + toint(`b`)"
    );
}

#[test]
fn unclosed_call_consumes_to_end_of_input() {
    // EOF terminates the argument list the same way FROM does
    let n = root("toint(x");
    assert!(matches!(n, Node::Func(_)));
}

// ===================================================================
// Resolution: strict vs lax
// ===================================================================

#[test]
fn unknown_function_fails_strict_parse() {
    let err = parse_err("no_such_fn(1)");
    assert_eq!(err.to_string(), "expr: non existent function no_such_fn");
    assert!(matches!(err, ParseError::UnknownFunction(_)));
}

#[test]
fn unknown_function_parses_lax_with_synthetic_descriptor() {
    let tree = parse_lax("no_such_fn(1)");
    let Some(Node::Func(FuncNode { name, desc, args, .. })) = tree.root() else {
        panic!("expected Func");
    };
    assert_eq!(name, "no_such_fn");
    assert!(desc.synthetic);
    assert_eq!(args.len(), 1);
    assert_eq!(tree.to_string(), "no_such_fn(1)");
}

#[test]
fn lax_and_strict_agree_on_known_functions() {
    let strict = parse("toint(x)").to_string();
    let lax = parse_lax("toint(x)").to_string();
    assert_eq!(strict, lax);
}

#[test]
fn strict_parse_resolves_non_synthetic_descriptors() {
    let n = root("toint(x)");
    let Node::Func(FuncNode { desc, .. }) = n else {
        panic!("expected Func");
    };
    assert!(!desc.synthetic);
    assert_eq!(desc.name, "toint");
}

#[test]
fn lookup_is_case_insensitive_but_name_is_preserved() {
    let n = root("TOINT(x)");
    let Node::Func(FuncNode { name, desc, .. }) = n else {
        panic!("expected Func");
    };
    assert_eq!(name, "TOINT");
    assert!(!desc.synthetic);
    assert_eq!(parse("TOINT(x)").to_string(), "TOINT(`x`)");
}

// ===================================================================
// Arity checking
// ===================================================================

#[test]
fn arity_violation_fails_the_strict_parse() {
    let err = parse_err("count(1, 2)");
    assert!(matches!(err, ParseError::StructuralCheck(_)));
    assert!(err.to_string().starts_with("expr: "));
}

#[test]
fn arity_is_not_checked_in_lax_mode() {
    let tree = parse_lax("count(1, 2)");
    assert_eq!(tree.to_string(), "count(1, 2)");
}

#[test]
fn variadic_functions_accept_many_arguments() {
    assert_eq!(
        parse("oneof(x, 1, 2, 3)").to_string(),
        "oneof(`x`, 1, 2, 3)"
    );
}
