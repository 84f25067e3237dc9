//! # gqlmark
//!
//! Parser and printer for a compact, GraphQL-like query markup.
//!
//! ## What does it look like?
//!
//! ```text
//! {
//!   user(id: 232) {
//!     id,
//!     name,
//!     photos(size: 50).first(10) {
//!       url
//!     }
//!   }
//! }
//! ```
//!
//! A document is a brace-delimited list of selections. Each selection has a
//! name, optional params (`(232)` or `(id: 232)`), any number of chained
//! filters (`.first(10)`), and a non-empty body of fields and nested
//! selections. See [`grammar`] for the full grammar.
//!
//! ## Key Features
//!
//! - **Two operations**: [`loads`] text into a [`Document`], [`dumps`] it back
//! - **Exact round-trips**: literals use JSON semantics both ways, so
//!   `loads(dumps(doc))` equals `doc`
//! - **Typed model**: params and filter arguments are a [`Value`], either a
//!   positional [`Literal`] or a named [`ArgMap`]
//! - **Positioned errors**: syntax errors report line, column and offset
//! - **No global state**: parser settings travel with each call in [`LoadOptions`]
//!
//! ## Quick Start
//!
//! ```rust
//! use gqlmark::{dumps, dumps_compact, loads, Literal};
//!
//! let doc = loads("{ photos(username: \"Hebe\").first(2) { url, width } }").unwrap();
//!
//! let photos = &doc[0];
//! assert_eq!(photos.name, "photos");
//! assert_eq!(photos.filter("first").and_then(|v| v.as_literal()), Some(&Literal::Int(2)));
//!
//! assert_eq!(
//!     dumps_compact(&doc).unwrap(),
//!     "{photos(username:\"Hebe\").first(2){url,width}}"
//! );
//!
//! let pretty = dumps(&doc).unwrap();
//! assert_eq!(loads(&pretty).unwrap(), doc);
//! ```
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - loading and dumping a query
//! - **`custom_options.rs`** - indentation, compact output and parser tracing
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod document;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::Parser;
pub use document::{Document, Filter, Property, Selection};
pub use error::{Error, Result};
pub use map::ArgMap;
pub use options::{DumpOptions, LoadOptions, DEFAULT_MAX_DEPTH};
pub use ser::Serializer;
pub use value::{Literal, Value};

use std::io;

/// Parse query text into a [`Document`].
///
/// # Examples
///
/// ```rust
/// use gqlmark::{loads, Property};
///
/// let doc = loads("{ user { id, name } }").unwrap();
/// assert_eq!(doc[0].name, "user");
/// assert_eq!(doc[0].properties, vec![Property::field("id"), Property::field("name")]);
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] with the position of the first violation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn loads(text: &str) -> Result<Document> {
    loads_with_options(text, &LoadOptions::default())
}

/// Parse query text with explicit parser settings.
///
/// # Errors
///
/// Returns [`Error::Syntax`] with the position of the first violation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn loads_with_options(text: &str, options: &LoadOptions) -> Result<Document> {
    let result = Parser::with_options(text, options.clone()).parse_document();
    if options.debug {
        match &result {
            Ok(document) => log::debug!("Parsed {} root selections", document.len()),
            Err(err) => log::debug!("Parse failed: {}", err),
        }
    }
    result
}

/// Parse query text from bytes.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the bytes are not UTF-8 or not a valid document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Document> {
    let text = std::str::from_utf8(v).map_err(|e| {
        let offset = e.valid_up_to();
        let valid = String::from_utf8_lossy(&v[..offset]);
        let line_start = valid.rfind('\n').map_or(0, |i| i + 1);
        let line = valid.matches('\n').count() + 1;
        let col = valid[line_start..].chars().count() + 1;
        Error::syntax(line, col, offset, &e.to_string(), None, &valid[line_start..])
    })?;
    loads(text)
}

/// Parse query text from an I/O stream.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails and [`Error::Syntax`] for invalid text.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    loads(&text)
}

/// Render a document as indented text (2 spaces per level).
///
/// # Examples
///
/// ```rust
/// use gqlmark::{dumps, Document, Selection};
///
/// let doc = Document::from(vec![Selection::new("user").with_field("id")]);
/// assert_eq!(dumps(&doc).unwrap(), "{\n  user {\n    id\n  }\n}");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedStructure`] if the document breaks the
/// document invariants.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn dumps(document: &Document) -> Result<String> {
    dumps_with_options(document, &DumpOptions::default())
}

/// Render a document with no whitespace at all.
///
/// # Errors
///
/// Returns [`Error::UnsupportedStructure`] if the document breaks the
/// document invariants.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn dumps_compact(document: &Document) -> Result<String> {
    dumps_with_options(document, &DumpOptions::compact())
}

/// Render a document with custom options.
///
/// # Errors
///
/// Returns [`Error::UnsupportedStructure`] if the document breaks the
/// document invariants.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn dumps_with_options(document: &Document, options: &DumpOptions) -> Result<String> {
    let mut serializer = Serializer::new(options.clone());
    serializer.serialize_document(document)?;
    Ok(serializer.into_inner())
}

/// Render a document to a writer as indented text.
///
/// # Errors
///
/// Returns an error if rendering fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, document: &Document) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, document, &DumpOptions::default())
}

/// Render a document to a writer with custom options.
///
/// # Errors
///
/// Returns an error if rendering fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, document: &Document, options: &DumpOptions) -> Result<()>
where
    W: io::Write,
{
    let text = dumps_with_options(document, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
