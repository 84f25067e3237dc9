//! Configuration options for loading and dumping documents.
//!
//! - [`DumpOptions`]: rendering mode for [`dumps_with_options`](crate::dumps_with_options)
//! - [`LoadOptions`]: per-call parser settings for [`loads_with_options`](crate::loads_with_options)
//!
//! Options are plain values handed to each call; nothing here is global.
//!
//! ## Examples
//!
//! ```rust
//! use gqlmark::{dumps_with_options, loads, DumpOptions};
//!
//! let doc = loads("{ user(id: 232) { id, name } }").unwrap();
//!
//! let text = dumps_with_options(&doc, &DumpOptions::new().with_indent(4)).unwrap();
//! assert!(text.contains("    user(id: 232) {"));
//!
//! let text = dumps_with_options(&doc, &DumpOptions::compact()).unwrap();
//! assert_eq!(text, "{user(id:232){id,name}}");
//! ```

/// Rendering options for the serializer.
///
/// `compact == true` is equivalent to `indent == 0`: no whitespace or
/// newlines anywhere in the output.
///
/// # Examples
///
/// ```rust
/// use gqlmark::DumpOptions;
///
/// let options = DumpOptions::new();
/// assert_eq!(options.indent, 2);
/// assert!(!options.compact);
///
/// assert_eq!(DumpOptions::compact().effective_indent(), 0);
/// assert_eq!(DumpOptions::new().with_indent(0).effective_indent(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpOptions {
    pub indent: usize,
    pub compact: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            indent: 2,
            compact: false,
        }
    }
}

impl DumpOptions {
    /// Creates default options (indented output, 2 spaces per level).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for compact, whitespace-free output.
    #[must_use]
    pub fn compact() -> Self {
        DumpOptions {
            compact: true,
            ..Default::default()
        }
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Switches compact rendering on or off.
    #[must_use]
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Indentation actually used when rendering; `0` selects compact mode.
    #[must_use]
    pub fn effective_indent(&self) -> usize {
        if self.compact {
            0
        } else {
            self.indent
        }
    }
}

/// Deepest selection nesting `loads` accepts by default, and the deepest
/// `dumps` will render.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser settings for a single `loads` call.
///
/// # Examples
///
/// ```rust
/// use gqlmark::{loads_with_options, LoadOptions};
///
/// let options = LoadOptions::new().with_debug(true).with_max_depth(8);
/// let doc = loads_with_options("{ a { b } }", &options).unwrap();
/// assert_eq!(doc.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Emit `trace` log records for every grammar rule tried and matched.
    pub debug: bool,
    /// Deepest allowed selection nesting; the root selections are depth 1.
    pub max_depth: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            debug: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
