//! Error types for parsing and printing query documents.
//!
//! Parsing has a single failure kind, [`Error::Syntax`], carrying the
//! position of the first violation and, when known, the rule or token that
//! was expected there. Parsing is all-or-nothing: no partial document is
//! ever returned.
//!
//! Printing fails with [`Error::UnsupportedStructure`] when a hand-built
//! document breaks the document invariants (empty property list, invalid
//! identifier, non-finite float, ...), instead of emitting text that would
//! not parse back.
//!
//! ## Examples
//!
//! ```rust
//! use gqlmark::{loads, Error};
//!
//! let err = loads("{ user {} }").unwrap_err();
//! assert!(err.is_syntax());
//! assert_eq!(err.position(), Some((1, 9)));
//!
//! if let Error::Syntax { expected, .. } = err {
//!     assert_eq!(expected.as_deref(), Some("identifier"));
//! }
//! ```

use thiserror::Error;

/// Represents all possible errors raised while loading or dumping a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input text does not match the grammar.
    #[error("Syntax error at line {line}, column {col}: {msg}\n{context}")]
    Syntax {
        line: usize,
        col: usize,
        /// Byte offset into the input.
        offset: usize,
        msg: String,
        expected: Option<String>,
        context: String,
    },

    /// The document handed to the serializer violates the document model.
    #[error("Unsupported structure: {0}")]
    UnsupportedStructure(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Creates a syntax error at the given position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gqlmark::Error;
    ///
    /// let err = Error::syntax(3, 7, 42, "missing ','", Some("','"), "  user {id name}");
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn syntax(
        line: usize,
        col: usize,
        offset: usize,
        msg: &str,
        expected: Option<&str>,
        context: &str,
    ) -> Self {
        Error::Syntax {
            line,
            col,
            offset,
            msg: msg.to_string(),
            expected: expected.map(str::to_string),
            context: context.to_string(),
        }
    }

    /// Creates an unsupported structure error for documents that cannot be printed.
    pub fn unsupported(msg: &str) -> Self {
        Error::UnsupportedStructure(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for [`Error::Syntax`].
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// Line and column (both 1-based) of a syntax error.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Syntax { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }

    /// Byte offset of a syntax error.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Syntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
