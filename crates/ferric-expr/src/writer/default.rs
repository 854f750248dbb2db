//! The default writer and its quoting-rule variants.

use std::collections::HashSet;

use super::escape::literal_quote_escape;
use super::DialectWriter;
use crate::value::Value;

/// The configurable default writer.
///
/// Escaping presets for common dialects:
/// - mysql:    literal `"`  identity `` ` ``
/// - postgres: literal `'`  identity `"`
/// - cql:      literal `'`  identity `` ` ``
#[derive(Debug, Clone)]
pub struct DefaultDialect {
    buf: String,
    null: String,
    literal_quote: u8,
    identity_quote: u8,
    strip_namespace: bool,
}

/// Creates a writer with custom literal and identity quote characters.
#[must_use]
pub fn new_dialect_writer(literal_quote: u8, identity_quote: u8) -> DefaultDialect {
    DefaultDialect {
        buf: String::new(),
        null: String::from("NULL"),
        literal_quote,
        identity_quote,
        strip_namespace: false,
    }
}

/// Creates the default writer: literal `"`, identity `` ` ``, null `NULL`.
#[must_use]
pub fn new_default_writer() -> DefaultDialect {
    new_dialect_writer(b'"', b'`')
}

/// As [`new_default_writer`], but left qualifiers are stripped so that
/// `users.email` emits as `` `email` ``.
#[must_use]
pub fn new_default_no_namespace_writer() -> DefaultDialect {
    let mut w = new_default_writer();
    w.strip_namespace = true;
    w
}

impl DefaultDialect {
    pub(crate) const fn identity_quote(&self) -> u8 {
        self.identity_quote
    }
}

impl DialectWriter for DefaultDialect {
    fn write_raw(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn len(&self) -> usize {
        self.buf.len()
    }

    fn write_literal(&mut self, s: &str) {
        if s == "*" {
            self.buf.push('*');
            return;
        }
        literal_quote_escape(&mut self.buf, self.literal_quote, s);
    }

    fn write_identity(&mut self, s: &str) {
        if s == "*" {
            self.buf.push('*');
            return;
        }
        literal_quote_escape(&mut self.buf, self.identity_quote, s);
    }

    fn write_left_right_identity(&mut self, left: &str, right: &str) {
        if left.is_empty() || self.strip_namespace {
            self.write_identity(right);
            return;
        }
        self.write_identity(left);
        self.buf.push('.');
        self.write_identity(right);
    }

    fn write_identity_quote(&mut self, s: &str, quote: u8) {
        if s == "*" {
            self.buf.push('*');
            return;
        }
        literal_quote_escape(&mut self.buf, quote, s);
    }

    fn write_number(&mut self, n: &str) {
        self.buf.push_str(n);
    }

    fn write_null(&mut self) {
        let null = self.null.clone();
        self.buf.push_str(&null);
    }

    fn write_value(&mut self, v: &Value) {
        match v {
            Value::Str(s) => self.write_literal(s),
            Value::Int(_) | Value::Number(_) => self.write_number(&v.to_text()),
            Value::Bool(b) => self.write_raw(&b.to_string()),
            Value::Time(t) => self.write_literal(&t.to_rfc3339()),
            Value::Slice(items) => match serde_json::to_string(items) {
                Ok(json) => self.write_raw(&json),
                Err(_) => self.write_raw("[]"),
            },
            Value::Map(map) => match serde_json::to_string(map) {
                Ok(json) => self.write_raw(&json),
                Err(_) => self.write_raw("null"),
            },
            Value::Nil => self.write_null(),
        }
    }

    fn as_str(&self) -> &str {
        &self.buf
    }
}

/// JSON-literal writer: string literals are emitted as JSON strings
/// (double-quoted, backslash-escaped); everything else follows the
/// default rules.
#[derive(Debug, Clone)]
pub struct JsonDialect {
    inner: DefaultDialect,
}

/// Creates a JSON-literal writer with identity `` ` `` and null `NULL`.
#[must_use]
pub fn new_json_dialect_writer() -> JsonDialect {
    JsonDialect {
        inner: new_default_writer(),
    }
}

impl DialectWriter for JsonDialect {
    fn write_raw(&mut self, s: &str) {
        self.inner.write_raw(s);
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn write_literal(&mut self, s: &str) {
        if s == "*" {
            self.inner.write_raw("*");
            return;
        }
        match serde_json::to_string(s) {
            Ok(quoted) => self.inner.write_raw(&quoted),
            Err(_) => self.inner.write_literal(s),
        }
    }

    fn write_identity(&mut self, s: &str) {
        self.inner.write_identity(s);
    }

    fn write_left_right_identity(&mut self, left: &str, right: &str) {
        self.inner.write_left_right_identity(left, right);
    }

    fn write_identity_quote(&mut self, s: &str, quote: u8) {
        self.inner.write_identity_quote(s, quote);
    }

    fn write_number(&mut self, n: &str) {
        self.inner.write_number(n);
    }

    fn write_null(&mut self) {
        self.inner.write_null();
    }

    fn write_value(&mut self, v: &Value) {
        match v {
            Value::Str(s) => self.write_literal(s),
            other => self.inner.write_value(other),
        }
    }

    fn as_str(&self) -> &str {
        self.inner.as_str()
    }
}

/// Keyword-aware writer: identifiers colliding with the reserved-word
/// set are force-quoted; all others delegate to the default rules.
#[derive(Debug, Clone)]
pub struct KeywordDialect {
    inner: DefaultDialect,
    keywords: HashSet<String>,
}

/// Creates a keyword-aware writer over the default dialect. Matching is
/// case-insensitive.
#[must_use]
pub fn new_keyword_dialect<S: AsRef<str>>(words: &[S]) -> KeywordDialect {
    KeywordDialect {
        inner: new_default_writer(),
        keywords: words.iter().map(|w| w.as_ref().to_lowercase()).collect(),
    }
}

impl DialectWriter for KeywordDialect {
    fn write_raw(&mut self, s: &str) {
        self.inner.write_raw(s);
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn write_literal(&mut self, s: &str) {
        self.inner.write_literal(s);
    }

    fn write_identity(&mut self, s: &str) {
        if self.keywords.contains(&s.to_lowercase()) {
            let quote = self.inner.identity_quote();
            self.inner.write_identity_quote(s, quote);
            return;
        }
        self.inner.write_identity(s);
    }

    fn write_left_right_identity(&mut self, left: &str, right: &str) {
        self.inner.write_left_right_identity(left, right);
    }

    fn write_identity_quote(&mut self, s: &str, quote: u8) {
        self.inner.write_identity_quote(s, quote);
    }

    fn write_number(&mut self, n: &str) {
        self.inner.write_number(n);
    }

    fn write_null(&mut self) {
        self.inner.write_null();
    }

    fn write_value(&mut self, v: &Value) {
        self.inner.write_value(v);
    }

    fn as_str(&self) -> &str {
        self.inner.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_literal_and_identity() {
        let mut w = new_default_writer();
        w.write_literal("a@b");
        w.write_raw(" ");
        w.write_identity("email");
        assert_eq!(w.as_str(), "\"a@b\" `email`");
    }

    #[test]
    fn test_star_passes_bare() {
        let mut w = new_default_writer();
        w.write_literal("*");
        w.write_identity("*");
        assert_eq!(w.as_str(), "**");
    }

    #[test]
    fn test_left_right_identity() {
        let mut w = new_default_writer();
        w.write_left_right_identity("users", "email");
        assert_eq!(w.as_str(), "`users`.`email`");

        let mut w = new_default_writer();
        w.write_left_right_identity("", "email");
        assert_eq!(w.as_str(), "`email`");
    }

    #[test]
    fn test_strip_namespace() {
        let mut w = new_default_no_namespace_writer();
        w.write_left_right_identity("users", "email");
        assert_eq!(w.as_str(), "`email`");
    }

    #[test]
    fn test_custom_quotes() {
        let mut w = new_dialect_writer(b'\'', b'"');
        w.write_literal("it's");
        w.write_raw(" ");
        w.write_identity("name");
        assert_eq!(w.as_str(), "'it''s' \"name\"");
    }

    #[test]
    fn test_json_literal() {
        let mut w = new_json_dialect_writer();
        w.write_literal("say \"hi\"\n");
        assert_eq!(w.as_str(), "\"say \\\"hi\\\"\\n\"");
    }

    #[test]
    fn test_keyword_dialect_quotes_keywords() {
        let mut w = new_keyword_dialect(&["order", "user"]);
        w.write_identity("ORDER");
        w.write_raw(" ");
        w.write_identity("name");
        assert_eq!(w.as_str(), "`ORDER` `name`");
    }

    #[test]
    fn test_write_value_dispatch() {
        let mut w = new_default_writer();
        w.write_value(&Value::from("s"));
        w.write_raw(" ");
        w.write_value(&Value::Int(7));
        w.write_raw(" ");
        w.write_value(&Value::Bool(false));
        w.write_raw(" ");
        w.write_value(&Value::Nil);
        assert_eq!(w.as_str(), "\"s\" 7 false NULL");
    }

    #[test]
    fn test_write_value_composites_as_json() {
        let mut w = new_default_writer();
        w.write_value(&Value::Slice(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(w.as_str(), "[1,2]");

        let mut w = new_default_writer();
        let mut m = std::collections::BTreeMap::new();
        m.insert(String::from("a"), Value::from("b"));
        w.write_value(&Value::Map(m));
        assert_eq!(w.as_str(), "{\"a\":\"b\"}");
    }

    #[test]
    fn test_write_value_time_quoted() {
        use chrono::TimeZone;
        let t = chrono::Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let mut w = new_default_writer();
        w.write_value(&Value::Time(t));
        assert_eq!(w.as_str(), "\"2020-01-02T03:04:05+00:00\"");
    }
}
