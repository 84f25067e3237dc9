//! The query markup grammar.
//!
//! ```text
//! document := '{' object (',' object)* '}'
//! object   := header '{' property (',' property)* '}'
//! header   := identifier arglist? filter*
//! filter   := '.' identifier arglist
//! arglist  := '(' ( literal | pair (',' pair)* )? ')'
//! pair     := identifier ':' literal
//! property := object | identifier
//! literal  := 'null' | 'true' | 'false' | number | string
//! ```
//!
//! - `identifier` is `[A-Za-z_][A-Za-z0-9_/]*`
//! - `number` is `-?[0-9]+(\.[0-9]+)?`; a decimal point makes it a float
//! - `string` is single- or double-quoted, without raw line breaks, using
//!   JSON escapes (plus `\'`)
//!
//! Whitespace, newlines included, may appear between any two tokens. The
//! document rule is anchored: nothing but whitespace may precede the
//! opening brace or follow the closing one.
//!
//! Every decision is made on the next token (or, for argument lists, on an
//! identifier followed by `:`), so recognition is a single linear pass.
//!
//! ## Examples
//!
//! ```rust
//! use gqlmark::grammar::{is_identifier, recognize, Rule};
//!
//! assert!(is_identifier("entity/23"));
//! assert!(!is_identifier("42as"));
//!
//! assert!(recognize(Rule::Header, "friends(recent: true).first(50)").is_ok());
//! assert!(recognize(Rule::Object, "user {}").is_err());
//! ```

use crate::de::Parser;
use crate::value::LexemeKind;
use crate::{Error, Result};
use std::fmt;

/// Named grammar rules, used in error messages and by [`recognize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    Literal,
    Identifier,
    ArgList,
    Filter,
    Header,
    Property,
    Object,
    Document,
}

impl Rule {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Rule::Literal => "literal",
            Rule::Identifier => "identifier",
            Rule::ArgList => "argument list",
            Rule::Filter => "filter",
            Rule::Header => "header",
            Rule::Property => "property",
            Rule::Object => "object",
            Rule::Document => "document",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks that the whole of `text` (ignoring surrounding whitespace) matches `rule`.
///
/// # Errors
///
/// Returns [`Error::Syntax`] at the first position where the text stops
/// matching, including trailing content after a complete match.
///
/// # Examples
///
/// ```rust
/// use gqlmark::grammar::{recognize, Rule};
///
/// assert!(recognize(Rule::Literal, "-12.334").is_ok());
/// assert!(recognize(Rule::ArgList, "(component/name: \"textarea\")").is_ok());
/// assert!(recognize(Rule::ArgList, "()").is_ok());
/// assert!(recognize(Rule::Identifier, "/fas").is_err());
/// ```
pub fn recognize(rule: Rule, text: &str) -> Result<()> {
    Parser::new(text).recognize(rule)
}

/// Returns `true` if `name` is a valid identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_char),
        _ => false,
    }
}

#[inline]
pub(crate) fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[inline]
pub(crate) fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '/'
}

/// A saved input position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Mark {
    pub position: usize,
    pub line: usize,
    pub column: usize,
}

/// A literal token, still in source form.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Lexeme<'a> {
    pub kind: LexemeKind,
    pub text: &'a str,
    pub mark: Mark,
}

/// Character-level scanner shared by every grammar rule.
///
/// Tracks line and column alongside the byte position so errors can
/// point into the source.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn mark(&self) -> Mark {
        Mark {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Skips whitespace and returns the next significant character.
    pub fn peek_token(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.peek_char()
    }

    /// Consumes `ch` if it is the next significant character.
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek_token() == Some(ch) {
            self.next_char();
            true
        } else {
            false
        }
    }

    /// Consumes `ch` or fails, naming `expected` in the error.
    pub fn expect(&mut self, ch: char, expected: &str) -> Result<()> {
        if self.eat(ch) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub fn identifier(&mut self) -> Result<&'a str> {
        self.skip_whitespace();
        let start = self.position;
        match self.peek_char() {
            Some(ch) if is_identifier_start(ch) => {
                self.next_char();
            }
            _ => return Err(self.unexpected(Rule::Identifier.as_str())),
        }
        while matches!(self.peek_char(), Some(ch) if is_identifier_char(ch)) {
            self.next_char();
        }
        Ok(&self.input[start..self.position])
    }

    pub fn literal(&mut self) -> Result<Lexeme<'a>> {
        self.skip_whitespace();
        let mark = self.mark();
        let kind = match self.peek_char() {
            Some(quote @ ('"' | '\'')) => {
                self.scan_string(quote, mark)?;
                LexemeKind::String
            }
            Some(ch) if ch == '-' || ch.is_ascii_digit() => {
                self.scan_number()?;
                LexemeKind::Number
            }
            Some(ch) if is_identifier_start(ch) => {
                while matches!(self.peek_char(), Some(ch) if is_identifier_char(ch)) {
                    self.next_char();
                }
                match &self.input[mark.position..self.position] {
                    "null" => LexemeKind::Null,
                    "true" => LexemeKind::True,
                    "false" => LexemeKind::False,
                    word => {
                        return Err(self.error_at(
                            mark,
                            &format!("expected literal, found '{}'", word),
                            Some(Rule::Literal.as_str()),
                        ))
                    }
                }
            }
            _ => return Err(self.unexpected(Rule::Literal.as_str())),
        };

        Ok(Lexeme {
            kind,
            text: &self.input[mark.position..self.position],
            mark,
        })
    }

    fn scan_string(&mut self, quote: char, start: Mark) -> Result<()> {
        self.next_char(); // opening quote
        loop {
            match self.next_char() {
                Some(ch) if ch == quote => return Ok(()),
                Some('\\') => {
                    if matches!(self.next_char(), None | Some('\n' | '\r')) {
                        break;
                    }
                }
                Some('\n' | '\r') | None => break,
                Some(_) => {}
            }
        }
        Err(self.error_at(
            start,
            "unterminated string",
            Some(if quote == '"' { "'\"'" } else { "\"'\"" }),
        ))
    }

    fn scan_number(&mut self) -> Result<()> {
        if self.peek_char() == Some('-') {
            self.next_char();
        }
        self.scan_digits()?;
        if self.peek_char() == Some('.') {
            self.next_char();
            self.scan_digits()?;
        }
        Ok(())
    }

    fn scan_digits(&mut self) -> Result<()> {
        if !matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
            return Err(self.unexpected("digit"));
        }
        while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
            self.next_char();
        }
        Ok(())
    }

    /// Error for the current position: "expected X, found Y".
    pub fn unexpected(&self, expected: &str) -> Error {
        let found = match self.peek_char() {
            Some(ch) => format!("'{}'", ch),
            None => "end of input".to_string(),
        };
        self.error_at(
            self.mark(),
            &format!("expected {}, found {}", expected, found),
            Some(expected),
        )
    }

    pub fn error_at(&self, mark: Mark, msg: &str, expected: Option<&str>) -> Error {
        Error::syntax(
            mark.line,
            mark.column,
            mark.position,
            msg,
            expected,
            &self.context(mark),
        )
    }

    /// The source line containing `mark`, with a caret under its column.
    fn context(&self, mark: Mark) -> String {
        let line_start = self.input[..mark.position]
            .rfind('\n')
            .map_or(0, |i| i + 1);
        let line_end = self.input[mark.position..]
            .find('\n')
            .map_or(self.input.len(), |i| mark.position + i);
        let line = self.input[line_start..line_end].trim_end_matches('\r');
        format!("{}\n{}^", line, " ".repeat(mark.column - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_rule() {
        for name in ["fooBar", "foo23_45", "entity/23", "_foo", "a"] {
            assert!(is_identifier(name), "{}", name);
        }
        for name in ["/fas", "42as", "", "foo-bar", "é"] {
            assert!(!is_identifier(name), "{}", name);
        }
    }

    #[test]
    fn test_cursor_tracks_lines() {
        let mut cursor = Cursor::new("{\n  user");
        assert!(cursor.eat('{'));
        assert_eq!(cursor.identifier().unwrap(), "user");
        let mark = cursor.mark();
        assert_eq!((mark.line, mark.column), (2, 7));
        assert!(cursor.at_end());
    }

    #[test]
    fn test_literal_tokens() {
        let mut cursor = Cursor::new(r#"  -12.334 'x' "y\"z" null"#);
        let number = cursor.literal().unwrap();
        assert_eq!((number.kind, number.text), (LexemeKind::Number, "-12.334"));
        assert_eq!(cursor.literal().unwrap().text, "'x'");
        assert_eq!(cursor.literal().unwrap().text, r#""y\"z""#);
        assert_eq!(cursor.literal().unwrap().kind, LexemeKind::Null);
    }

    #[test]
    fn test_malformed_literals() {
        assert!(Cursor::new("\"open").literal().is_err());
        assert!(Cursor::new("'line\nbreak'").literal().is_err());
        assert!(Cursor::new("-").literal().is_err());
        assert!(Cursor::new("1.").literal().is_err());
        assert!(Cursor::new("nil").literal().is_err());
    }

    #[test]
    fn test_error_context_points_at_column() {
        let mut cursor = Cursor::new("{\n  user {id name}\n}");
        cursor.eat('{');
        cursor.identifier().unwrap();
        cursor.eat('{');
        cursor.identifier().unwrap();
        let err = cursor.expect('}', "'}'").unwrap_err();
        match err {
            Error::Syntax {
                line, col, context, ..
            } => {
                assert_eq!((line, col), (2, 12));
                assert_eq!(context, format!("  user {{id name}}\n{}^", " ".repeat(11)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
