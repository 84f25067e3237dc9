//! Query text serialization.
//!
//! This module provides the [`Serializer`] that renders a [`Document`] back
//! into query text.
//!
//! ## Overview
//!
//! Two rendering modes are supported, selected by
//! [`DumpOptions::effective_indent`]:
//!
//! - **Indented** (`indent > 0`): one property per line, nested bodies
//!   indented by `indent` spaces per level, `name: value` arguments
//! - **Compact** (`indent == 0`): no whitespace or newlines at all
//!
//! Within a selection the order is fixed: name, params, filters in their
//! recorded order, then the property block. Output always parses back
//! into an equal document.
//!
//! ## Usage
//!
//! ```rust
//! use gqlmark::{args, DumpOptions, Document, Selection, Serializer};
//!
//! let doc = Document::from(vec![
//!     Selection::new("user")
//!         .with_params(232)
//!         .with_filter("active", true)
//!         .with_field("id"),
//! ]);
//!
//! let mut serializer = Serializer::new(DumpOptions::compact());
//! serializer.serialize_document(&doc).unwrap();
//! assert_eq!(serializer.into_inner(), "{user(232).active(true){id}}");
//! ```

use crate::value::write_literal;
use crate::{Document, DumpOptions, Property, Result, Selection, Value};

/// The query text serializer.
///
/// Writes into an internal buffer; take the text with [`Serializer::into_inner`].
pub struct Serializer {
    output: String,
    indent: usize,
}

impl Serializer {
    pub fn new(options: DumpOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            indent: options.effective_indent(),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Renders `document` after checking it against the document invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedStructure`](crate::Error::UnsupportedStructure)
    /// if the document is empty, has a selection without properties, an
    /// invalid name, empty-mapping params, or a non-finite float.
    pub fn serialize_document(&mut self, document: &Document) -> Result<()> {
        document.validate()?;

        self.output.push('{');
        self.write_newline();
        for (i, selection) in document.selections.iter().enumerate() {
            if i > 0 {
                self.write_separator();
            }
            self.write_selection(selection, 1)?;
        }
        self.write_newline();
        self.output.push('}');
        Ok(())
    }

    #[inline]
    fn pretty(&self) -> bool {
        self.indent > 0
    }

    fn write_newline(&mut self) {
        if self.pretty() {
            self.output.push('\n');
        }
    }

    /// Separator between sibling selections or properties.
    fn write_separator(&mut self) {
        self.output.push(',');
        self.write_newline();
    }

    fn write_indent(&mut self, depth: usize) {
        for _ in 0..depth * self.indent {
            self.output.push(' ');
        }
    }

    fn write_selection(&mut self, selection: &Selection, depth: usize) -> Result<()> {
        self.write_indent(depth);
        self.output.push_str(&selection.name);

        if let Some(params) = &selection.params {
            self.write_args(params)?;
        }
        for filter in &selection.filters {
            self.output.push('.');
            self.output.push_str(&filter.name);
            self.write_args(&filter.value)?;
        }

        if self.pretty() {
            self.output.push(' ');
        }
        self.output.push('{');
        self.write_newline();

        for (i, property) in selection.properties.iter().enumerate() {
            if i > 0 {
                self.write_separator();
            }
            match property {
                Property::Field { name } => {
                    self.write_indent(depth + 1);
                    self.output.push_str(name);
                }
                Property::Selection(nested) => self.write_selection(nested, depth + 1)?,
            }
        }

        self.write_newline();
        self.write_indent(depth);
        self.output.push('}');
        Ok(())
    }

    fn write_args(&mut self, value: &Value) -> Result<()> {
        self.output.push('(');
        match value {
            Value::Literal(literal) => write_literal(&mut self.output, literal)?,
            Value::Mapping(map) => {
                for (i, (name, literal)) in map.iter().enumerate() {
                    if i > 0 {
                        self.output.push(',');
                        if self.pretty() {
                            self.output.push(' ');
                        }
                    }
                    self.output.push_str(name);
                    self.output.push(':');
                    if self.pretty() {
                        self.output.push(' ');
                    }
                    write_literal(&mut self.output, literal)?;
                }
            }
        }
        self.output.push(')');
        Ok(())
    }
}
