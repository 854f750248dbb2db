//! Function registry.
//!
//! A process-wide lookup surface the parser queries by lower-cased name
//! when semantic checking is requested. The registry is populated once at
//! startup; concurrent reads during parsing are safe.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use crate::parser::ParseError;
use crate::value::Value;

/// Read capability over the evaluation context a function sees.
pub trait ContextReader {
    /// Looks up a binding by key.
    fn get(&self, key: &str) -> Option<Value>;
}

/// The shape of a registered evaluation function.
pub type EvalFn = fn(&[Value], &dyn ContextReader) -> Option<Value>;

/// The canonical shape of an unregistered lookup: always absent.
#[must_use]
pub fn empty_eval_func(_args: &[Value], _ctx: &dyn ContextReader) -> Option<Value> {
    None
}

/// A registered function descriptor: name plus arity bounds.
///
/// Descriptors carry no evaluation logic; they exist so the parser can
/// validate calls structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDesc {
    /// The function name, as registered.
    pub name: String,
    /// Minimum argument count.
    pub min_args: usize,
    /// Maximum argument count; `usize::MAX` means variadic.
    pub max_args: usize,
    /// True when the descriptor was fabricated by a lax-mode parse
    /// rather than resolved against the registry.
    pub synthetic: bool,
}

impl FuncDesc {
    /// Creates a resolved descriptor with the given arity bounds.
    #[must_use]
    pub fn new(name: impl Into<String>, min_args: usize, max_args: usize) -> Self {
        Self {
            name: name.into(),
            min_args,
            max_args,
            synthetic: false,
        }
    }

    /// Creates the stand-in descriptor a lax-mode parse installs for an
    /// unknown name, so the AST stays well-formed for syntactic tooling.
    #[must_use]
    pub fn synthetic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_args: 0,
            max_args: usize::MAX,
            synthetic: true,
        }
    }

    /// Validates a call-site argument count against the arity bounds.
    pub fn validate_arity(&self, got: usize) -> Result<(), ParseError> {
        if got < self.min_args {
            return Err(ParseError::StructuralCheck(format!(
                "function {} expects at least {} argument(s), got {}",
                self.name, self.min_args, got
            )));
        }
        if got > self.max_args {
            return Err(ParseError::StructuralCheck(format!(
                "function {} expects at most {} argument(s), got {}",
                self.name, self.max_args, got
            )));
        }
        Ok(())
    }
}

static FUNCS: Lazy<RwLock<HashMap<String, FuncDesc>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a function descriptor under its lower-cased name.
pub fn register_func(desc: FuncDesc) {
    FUNCS.write().insert(desc.name.to_lowercase(), desc);
}

/// Looks up a descriptor by name, case-insensitively.
#[must_use]
pub fn lookup(name: &str) -> Option<FuncDesc> {
    FUNCS.read().get(&name.to_lowercase()).cloned()
}

static LOAD_BUILTINS: std::sync::Once = std::sync::Once::new();

/// Registers descriptors for the builtin function set.
///
/// Idempotent; callers invoke it once during process initialization.
pub fn load_all_builtins() {
    LOAD_BUILTINS.call_once(|| {
        let builtins: &[(&str, usize, usize)] = &[
            ("count", 1, 1),
            ("eq", 2, 2),
            ("ne", 2, 2),
            ("not", 1, 1),
            ("exists", 1, 1),
            ("any", 1, usize::MAX),
            ("all", 1, usize::MAX),
            ("oneof", 2, usize::MAX),
            ("email", 1, 1),
            ("host", 1, 1),
            ("path", 1, 1),
            ("qs", 2, 2),
            ("toint", 1, 1),
            ("tostring", 1, 1),
            ("todate", 1, 2),
            ("now", 0, 0),
            ("yy", 0, 1),
            ("mm", 0, 1),
            ("len", 1, 1),
            ("join", 2, usize::MAX),
            ("contains", 2, 2),
            ("lower", 1, 1),
            ("upper", 1, 1),
            ("replace", 2, 3),
        ];
        for &(name, min_args, max_args) in builtins {
            register_func(FuncDesc::new(name, min_args, max_args));
        }
        debug!(count = builtins.len(), "registered builtin functions");
    });
}
