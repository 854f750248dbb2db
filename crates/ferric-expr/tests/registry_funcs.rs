//! Registry behavior for unregistered lookups.

use ferric_expr::{empty_eval_func, load_all_builtins, ContextReader, Value};

struct EmptyContext;

impl ContextReader for EmptyContext {
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }
}

#[test]
fn unregistered_lookup_is_absent() {
    load_all_builtins();
    assert!(empty_eval_func(&[], &EmptyContext).is_none());
    assert!(empty_eval_func(&[Value::Int(1)], &EmptyContext).is_none());
}
