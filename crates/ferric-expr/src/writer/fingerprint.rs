//! Fingerprint writer: erases concrete literals for query-shape
//! aggregation.

use super::{new_default_writer, DefaultDialect, DialectWriter};
use crate::value::Value;

/// A decorator over any base writer that replaces every literal and
/// number with a placeholder and lower-cases identifiers on emission.
///
/// Qualified identities (`users.email`) delegate to the base writer
/// unchanged.
#[derive(Debug, Clone)]
pub struct FingerprintDialect<W: DialectWriter> {
    inner: W,
    replace: String,
}

/// Creates the standard fingerprinter: a default writer with `?`
/// placeholders.
#[must_use]
pub fn new_fingerprinter() -> FingerprintDialect<DefaultDialect> {
    FingerprintDialect {
        inner: new_default_writer(),
        replace: String::from("?"),
    }
}

/// Creates a fingerprinter with a custom placeholder over a custom base
/// writer.
#[must_use]
pub fn new_fingerprint_writer<W: DialectWriter>(
    replacement: impl Into<String>,
    base: W,
) -> FingerprintDialect<W> {
    FingerprintDialect {
        inner: base,
        replace: replacement.into(),
    }
}

impl<W: DialectWriter> DialectWriter for FingerprintDialect<W> {
    fn write_raw(&mut self, s: &str) {
        self.inner.write_raw(s);
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn write_literal(&mut self, _s: &str) {
        let replace = self.replace.clone();
        self.inner.write_raw(&replace);
    }

    fn write_identity(&mut self, s: &str) {
        self.inner.write_identity(&s.to_lowercase());
    }

    fn write_left_right_identity(&mut self, left: &str, right: &str) {
        self.inner.write_left_right_identity(left, right);
    }

    fn write_identity_quote(&mut self, s: &str, quote: u8) {
        self.inner.write_identity_quote(s, quote);
    }

    fn write_number(&mut self, _n: &str) {
        let replace = self.replace.clone();
        self.inner.write_raw(&replace);
    }

    fn write_null(&mut self) {
        self.inner.write_null();
    }

    fn write_value(&mut self, v: &Value) {
        match v {
            Value::Str(_) => self.write_literal(""),
            Value::Int(_) | Value::Number(_) => self.write_number(""),
            other => self.inner.write_value(other),
        }
    }

    fn as_str(&self) -> &str {
        self.inner.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_and_numbers_replaced() {
        let mut w = new_fingerprinter();
        w.write_literal("secret");
        w.write_raw(" ");
        w.write_number("42");
        assert_eq!(w.as_str(), "? ?");
    }

    #[test]
    fn test_identity_lowercased() {
        let mut w = new_fingerprinter();
        w.write_identity("UserName");
        assert_eq!(w.as_str(), "`username`");
    }

    #[test]
    fn test_custom_placeholder() {
        let mut w = new_fingerprint_writer("$1", new_default_writer());
        w.write_literal("x");
        assert_eq!(w.as_str(), "$1");
    }
}
