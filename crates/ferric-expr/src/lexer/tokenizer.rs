//! Expression tokenizer.

use super::{Span, Token, TokenKind};

/// Selects the keyword rule-set the lexer applies to bare names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LexDialect {
    /// The default single-expression dialect.
    #[default]
    Expression,
}

impl LexDialect {
    /// Maps a bare word to a keyword token kind, case-insensitively.
    #[must_use]
    pub fn keyword(&self, word: &str) -> Option<TokenKind> {
        match word.to_ascii_uppercase().as_str() {
            "AND" => Some(TokenKind::And),
            "OR" => Some(TokenKind::Or),
            "NOT" => Some(TokenKind::Negate),
            "LIKE" => Some(TokenKind::Like),
            "IN" => Some(TokenKind::In),
            "BETWEEN" => Some(TokenKind::Between),
            "NULL" => Some(TokenKind::Null),
            "SELECT" => Some(TokenKind::Select),
            "FROM" => Some(TokenKind::From),
            "AS" => Some(TokenKind::As),
            "LIMIT" => Some(TokenKind::Limit),
            "IF" => Some(TokenKind::If),
            _ => None,
        }
    }
}

/// A lexer producing the token stream for one expression.
///
/// Unlike a statement-level lexer, comments are not skipped: `--` yields a
/// [`TokenKind::CommentSingleLine`] token followed by one
/// [`TokenKind::Comment`] token carrying the rest of the line, and the
/// parser consumes both.
pub struct Lexer<'a> {
    /// The input source text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    dialect: LexDialect,
    /// Set after `--` so the next call yields the comment body.
    pending_comment: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input and dialect.
    #[must_use]
    pub const fn new(input: &'a str, dialect: LexDialect) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            dialect,
            pending_comment: false,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn make_token(&self, kind: TokenKind, value: String) -> Token {
        Token::new(kind, value, Span::new(self.start, self.pos))
    }

    fn make_symbol(&self, kind: TokenKind) -> Token {
        let text = self.input[self.start..self.pos].to_string();
        self.make_token(kind, text)
    }

    /// Scans the next token.
    pub fn next_token(&mut self) -> Token {
        if self.pending_comment {
            self.pending_comment = false;
            self.start = self.pos;
            while self.peek().is_some_and(|c| c != '\n') {
                self.advance();
            }
            let body = self.input[self.start..self.pos].trim().to_string();
            return self.make_token(TokenKind::Comment, body);
        }

        self.skip_whitespace();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof, String::new());
        };

        match c {
            '(' => self.make_symbol(TokenKind::LeftParen),
            ')' => self.make_symbol(TokenKind::RightParen),
            ',' => self.make_symbol(TokenKind::Comma),
            ';' => self.make_symbol(TokenKind::Eos),
            '+' => self.make_symbol(TokenKind::Plus),
            '-' => {
                if self.peek() == Some('-') {
                    self.advance();
                    self.pending_comment = true;
                    self.make_symbol(TokenKind::CommentSingleLine)
                } else {
                    self.make_symbol(TokenKind::Minus)
                }
            }
            '*' => self.make_symbol(TokenKind::Star),
            '/' => self.make_symbol(TokenKind::Divide),
            '%' => self.make_symbol(TokenKind::Modulus),
            '?' => self.make_symbol(TokenKind::Question),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_symbol(TokenKind::EqualEqual)
                } else {
                    self.make_symbol(TokenKind::Equal)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_symbol(TokenKind::NotEqual)
                } else {
                    self.make_symbol(TokenKind::Negate)
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_symbol(TokenKind::Le)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_symbol(TokenKind::NotEqual)
                } else {
                    self.make_symbol(TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_symbol(TokenKind::Ge)
                } else {
                    self.make_symbol(TokenKind::Gt)
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    self.make_symbol(TokenKind::LogicAnd)
                } else {
                    self.make_token(TokenKind::Error, String::from("unexpected character: &"))
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.make_symbol(TokenKind::LogicOr)
                } else {
                    self.make_token(TokenKind::Error, String::from("unexpected character: |"))
                }
            }
            '"' | '\'' => {
                self.pos = self.start;
                self.scan_string(c)
            }
            '`' => {
                self.pos = self.start;
                self.scan_identity()
            }
            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }
            c if c.is_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_identity()
            }
            _ => self.make_token(TokenKind::Error, format!("unexpected character: {c}")),
        }
    }

    /// Scans a string literal delimited by `quote`, with doubled-quote
    /// escapes.
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        value.push(quote);
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => {
                    return self
                        .make_token(TokenKind::Error, String::from("unterminated string literal"));
                }
            }
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::Value, value)
    }

    /// Scans a number (integer or float), keeping the original text.
    fn scan_number(&mut self) -> Token {
        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            is_float = true;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = self.input[self.start..self.pos].to_string();
        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        self.make_token(kind, text)
    }

    /// Scans an identity: bare or backtick-quoted segments, optionally
    /// joined by dots (`` `users`.`email` `` and `users.email` both yield
    /// one token with value `users.email`).
    fn scan_identity(&mut self) -> Token {
        let mut parts: Vec<String> = Vec::new();
        let mut first_quoted = false;

        loop {
            match self.peek() {
                Some('`') => {
                    if parts.is_empty() {
                        first_quoted = true;
                    }
                    self.advance(); // opening quote
                    let mut seg = String::new();
                    loop {
                        match self.peek() {
                            Some('`') => {
                                if self.peek_next() == Some('`') {
                                    seg.push('`');
                                    self.advance();
                                    self.advance();
                                } else {
                                    self.advance();
                                    break;
                                }
                            }
                            Some(ch) => {
                                seg.push(ch);
                                self.advance();
                            }
                            None => {
                                return self.make_token(
                                    TokenKind::Error,
                                    String::from("unterminated quoted identity"),
                                );
                            }
                        }
                    }
                    parts.push(seg);
                }
                Some(c) if c.is_alphabetic() || c == '_' => {
                    let seg_start = self.pos;
                    while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                        self.advance();
                    }
                    parts.push(self.input[seg_start..self.pos].to_string());
                }
                _ => break,
            }

            // Dotted continuation: `users.email`, `` `a`.`b` ``
            if self.peek() == Some('.')
                && self
                    .peek_next()
                    .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '`')
            {
                self.advance();
            } else {
                break;
            }
        }

        let text = parts.join(".");

        // Keywords apply only to single bare words; `` `select` `` stays
        // an identity.
        if parts.len() == 1 && !first_quoted {
            if let Some(kind) = self.dialect.keyword(&text) {
                return self.make_token(kind, text);
            }
        }

        if self.peek() == Some('(') {
            self.make_token(TokenKind::UdfExpr, text)
        } else {
            self.make_token(TokenKind::Identity, text)
        }
    }
}
