//! Query text parsing.
//!
//! This module provides the [`Parser`] that turns query text into a
//! [`Document`].
//!
//! ## Overview
//!
//! - **Single-pass parsing**: recursive descent over the grammar in
//!   [`grammar`](crate::grammar), deciding every branch on the next token
//! - **Typed results**: argument lists become a [`Value`] and properties a
//!   [`Property`] as soon as they are read
//! - **All-or-nothing**: the first violation aborts the parse with a
//!   positioned [`Error::Syntax`](crate::Error::Syntax)
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use gqlmark::{loads, Literal};
//!
//! let doc = loads("{ user(232) { id, name } }").unwrap();
//! assert_eq!(doc[0].params.as_ref().and_then(|p| p.as_literal()), Some(&Literal::Int(232)));
//! ```

use crate::grammar::{Cursor, Lexeme, Rule};
use crate::value::convert_literal;
use crate::{ArgMap, Document, Filter, Literal, LoadOptions, Property, Result, Selection, Value};

/// An evaluated argument list, before it is attached as params or a filter.
enum Args {
    Empty,
    Positional(Literal),
    Named(ArgMap),
}

/// The query text parser.
///
/// Holds no state beyond the input position and the options of this
/// call, so independent parsers can run concurrently.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    options: LoadOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, LoadOptions::default())
    }

    pub fn with_options(input: &'a str, options: LoadOptions) -> Self {
        Parser {
            cursor: Cursor::new(input),
            options,
            depth: 0,
        }
    }

    /// Parses the whole input as a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`](crate::Error::Syntax) for any grammar violation, including
    /// content before or after the document braces.
    pub fn parse_document(&mut self) -> Result<Document> {
        self.trace(Rule::Document);
        self.cursor.expect('{', "'{'")?;

        let mut selections = vec![self.parse_object()?];
        while self.cursor.eat(',') {
            selections.push(self.parse_object()?);
        }
        self.cursor.expect('}', "',' or '}'")?;
        self.expect_end()?;

        self.matched(Rule::Document);
        Ok(Document::from(selections))
    }

    /// Matches the whole input against a single rule, discarding the result.
    pub(crate) fn recognize(&mut self, rule: Rule) -> Result<()> {
        match rule {
            Rule::Document => return self.parse_document().map(|_| ()),
            Rule::Literal => {
                self.parse_literal()?;
            }
            Rule::Identifier => {
                self.cursor.identifier()?;
            }
            Rule::ArgList => {
                self.cursor.expect('(', "'('")?;
                self.parse_args()?;
            }
            Rule::Filter => {
                self.cursor.expect('.', "'.'")?;
                self.parse_filter()?;
            }
            Rule::Header => {
                let name = self.cursor.identifier()?;
                self.parse_header_rest(name)?;
            }
            Rule::Property => {
                self.parse_property()?;
            }
            Rule::Object => {
                self.parse_object()?;
            }
        }
        self.expect_end()
    }

    fn expect_end(&mut self) -> Result<()> {
        self.cursor.skip_whitespace();
        if self.cursor.at_end() {
            Ok(())
        } else {
            Err(self.cursor.unexpected("end of input"))
        }
    }

    fn parse_object(&mut self) -> Result<Selection> {
        let name = self.cursor.identifier()?;
        self.parse_object_rest(name)
    }

    /// Parses an object whose name has already been read.
    fn parse_object_rest(&mut self, name: &str) -> Result<Selection> {
        self.trace(Rule::Object);
        self.depth += 1;
        if self.depth > self.options.max_depth {
            let mark = self.cursor.mark();
            return Err(self.cursor.error_at(
                mark,
                &format!("selections nested deeper than {}", self.options.max_depth),
                None,
            ));
        }

        let mut selection = self.parse_header_rest(name)?;

        self.cursor.expect('{', "'{'")?;
        selection.properties.push(self.parse_property()?);
        while self.cursor.eat(',') {
            selection.properties.push(self.parse_property()?);
        }
        self.cursor.expect('}', "',' or '}'")?;

        self.depth -= 1;
        self.matched(Rule::Object);
        Ok(selection)
    }

    /// Parses the optional params and filters following a selection name.
    fn parse_header_rest(&mut self, name: &str) -> Result<Selection> {
        self.trace(Rule::Header);
        let mut selection = Selection::new(name);

        if self.cursor.eat('(') {
            selection.params = match self.parse_args()? {
                Args::Empty => None,
                Args::Positional(literal) => Some(Value::Literal(literal)),
                Args::Named(map) => Some(Value::Mapping(map)),
            };
        }

        while self.cursor.eat('.') {
            selection.filters.push(self.parse_filter()?);
        }

        self.matched(Rule::Header);
        Ok(selection)
    }

    /// Parses `identifier arglist` after the leading dot.
    fn parse_filter(&mut self) -> Result<Filter> {
        self.trace(Rule::Filter);
        let name = self.cursor.identifier()?;
        self.cursor.expect('(', "'('")?;
        let value = match self.parse_args()? {
            Args::Empty => Value::Mapping(ArgMap::new()),
            Args::Positional(literal) => Value::Literal(literal),
            Args::Named(map) => Value::Mapping(map),
        };
        self.matched(Rule::Filter);
        Ok(Filter::new(name, value))
    }

    fn parse_property(&mut self) -> Result<Property> {
        self.trace(Rule::Property);
        let name = self.cursor.identifier()?;
        let property = match self.cursor.peek_token() {
            Some('(' | '.' | '{') => Property::Selection(self.parse_object_rest(name)?),
            _ => Property::field(name),
        };
        self.matched(Rule::Property);
        Ok(property)
    }

    /// Parses an argument list after its opening parenthesis.
    fn parse_args(&mut self) -> Result<Args> {
        self.trace(Rule::ArgList);
        if self.cursor.eat(')') {
            self.matched(Rule::ArgList);
            return Ok(Args::Empty);
        }

        let args = if self.starts_pair() {
            let mut map = ArgMap::new();
            loop {
                let name = self.cursor.identifier()?;
                self.cursor.expect(':', "':'")?;
                map.insert(name.to_string(), self.parse_literal()?);
                if !self.cursor.eat(',') {
                    break;
                }
            }
            Args::Named(map)
        } else {
            Args::Positional(self.parse_literal()?)
        };

        self.cursor.expect(')', "')'")?;
        self.matched(Rule::ArgList);
        Ok(args)
    }

    /// Looks ahead for `identifier ':'` without consuming input.
    fn starts_pair(&self) -> bool {
        let mut probe = self.cursor;
        probe.identifier().is_ok() && probe.eat(':')
    }

    fn parse_literal(&mut self) -> Result<Literal> {
        let lexeme: Lexeme<'a> = self.cursor.literal()?;
        convert_literal(lexeme.kind, lexeme.text)
            .map_err(|msg| self.cursor.error_at(lexeme.mark, &msg, Some(Rule::Literal.as_str())))
    }

    fn trace(&self, rule: Rule) {
        if self.options.debug {
            let mark = self.cursor.mark();
            log::trace!("Match {} at line {}, column {}", rule, mark.line, mark.column);
        }
    }

    fn matched(&self, rule: Rule) {
        if self.options.debug {
            let mark = self.cursor.mark();
            log::trace!("Matched {} up to line {}, column {}", rule, mark.line, mark.column);
        }
    }
}
