//! Ordered map type for named argument lists.
//!
//! [`ArgMap`] wraps an [`IndexMap`] so that `(id: 1, name: "x")` prints back
//! in the order it was written. Order is kept for deterministic output only;
//! two maps with the same entries in a different order compare equal.
//!
//! ## Examples
//!
//! ```rust
//! use gqlmark::{ArgMap, Literal};
//!
//! let mut map = ArgMap::new();
//! map.insert("id".to_string(), Literal::from(12));
//! map.insert("name".to_string(), Literal::from("Adalberto"));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("id").and_then(|v| v.as_i64()), Some(12));
//! ```

use crate::Literal;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered map of argument names to literal values.
///
/// # Examples
///
/// ```rust
/// use gqlmark::{ArgMap, Literal};
///
/// let map: ArgMap = vec![
///     ("first".to_string(), Literal::from(1)),
///     ("second".to_string(), Literal::from(2)),
/// ]
/// .into_iter()
/// .collect();
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgMap(IndexMap<String, Literal>);

impl ArgMap {
    /// Creates an empty `ArgMap`.
    #[must_use]
    pub fn new() -> Self {
        ArgMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ArgMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts an argument, returning the previous value for that name.
    ///
    /// A repeated name keeps its original position and takes the new value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gqlmark::{ArgMap, Literal};
    ///
    /// let mut map = ArgMap::new();
    /// assert!(map.insert("id".to_string(), Literal::from(1)).is_none());
    /// assert_eq!(map.insert("id".to_string(), Literal::from(2)), Some(Literal::from(1)));
    /// ```
    pub fn insert(&mut self, key: String, value: Literal) -> Option<Literal> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Literal> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the argument names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Literal> {
        self.0.keys()
    }

    /// Returns an iterator over the argument values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Literal> {
        self.0.values()
    }

    /// Returns an iterator over the name-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Literal> {
        self.0.iter()
    }
}

impl IntoIterator for ArgMap {
    type Item = (String, Literal);
    type IntoIter = indexmap::map::IntoIter<String, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArgMap {
    type Item = (&'a String, &'a Literal);
    type IntoIter = indexmap::map::Iter<'a, String, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Literal)> for ArgMap {
    fn from_iter<T: IntoIterator<Item = (String, Literal)>>(iter: T) -> Self {
        ArgMap(IndexMap::from_iter(iter))
    }
}
