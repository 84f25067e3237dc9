//! The document model produced by `loads` and consumed by `dumps`.
//!
//! A [`Document`] is an ordered list of root [`Selection`]s. Each selection
//! has a name, optional params, an ordered list of [`Filter`]s and a
//! non-empty list of [`Property`] children, which are either leaf fields
//! or nested selections.
//!
//! ## Filters
//!
//! Filters are kept in declaration order and duplicates are preserved:
//! `photos.after(1).after(2)` has two filters. Consumers that want a
//! name-keyed view use [`Selection::filter_map`], where the last filter with
//! a given name wins.
//!
//! ## Building documents by hand
//!
//! ```rust
//! use gqlmark::{args, dumps_compact, Document, Selection};
//!
//! let doc = Document::from(vec![
//!     Selection::new("user")
//!         .with_params(args! { "id" => 232 })
//!         .with_field("id")
//!         .with_field("name"),
//! ]);
//!
//! assert_eq!(dumps_compact(&doc).unwrap(), "{user(id:232){id,name}}");
//! ```
//!
//! ## Serde
//!
//! The model serializes to plain data: a selection is
//! `{"name", "params"?, "filters"?, "properties"}` and a field is `{"name"}`.
//! Filters serialize as `[name, value]` pairs and deserialize from either
//! such pairs or a name-keyed object. Unknown keys are rejected at every
//! level.

use crate::options::DEFAULT_MAX_DEPTH;
use crate::{Error, Result, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::ops::Deref;
use std::str::FromStr;

/// The top-level ordered list of root selections.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub selections: Vec<Selection>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selections.push(selection);
        self
    }

    /// Returns the first root selection with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Selection> {
        self.selections.iter().find(|s| s.name == name)
    }

    /// Checks the invariants `dumps` relies on.
    ///
    /// Nesting is limited to [`DEFAULT_MAX_DEPTH`] levels, the deepest a
    /// default `loads` reads back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedStructure`] naming the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.selections.is_empty() {
            return Err(Error::unsupported("document has no selections"));
        }
        self.selections.iter().try_for_each(|s| s.validate(1))
    }
}

impl Deref for Document {
    type Target = [Selection];

    fn deref(&self) -> &Self::Target {
        &self.selections
    }
}

impl From<Vec<Selection>> for Document {
    fn from(selections: Vec<Selection>) -> Self {
        Document { selections }
    }
}

impl IntoIterator for Document {
    type Item = Selection;
    type IntoIter = std::vec::IntoIter<Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Selection;
    type IntoIter = std::slice::Iter<'a, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.iter()
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::loads(s)
    }
}

/// A named field with optional arguments, filters and a non-empty body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Selection {
    pub name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_params"
    )]
    pub params: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "filter_list")]
    pub filters: Vec<Filter>,
    pub properties: Vec<Property>,
}

impl Selection {
    /// Creates a selection with no params, filters or properties.
    ///
    /// At least one property must be added before the selection can be dumped.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Selection {
            name: name.into(),
            params: None,
            filters: Vec::new(),
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: impl Into<Value>) -> Self {
        self.params = Some(params.into());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::new(name, value));
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.properties.push(Property::field(name));
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.properties.push(Property::Selection(selection));
        self
    }

    /// The last filter with the given name.
    #[must_use]
    pub fn filter(&self, name: &str) -> Option<&Value> {
        self.filters
            .iter()
            .rev()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    /// Name-keyed view of the filters.
    ///
    /// A repeated filter name keeps the position of its first occurrence and
    /// the value of its last.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gqlmark::{loads, Literal};
    ///
    /// let doc = loads("{ photos.first(2).first(5) { url } }").unwrap();
    /// let photos = &doc[0];
    /// assert_eq!(photos.filters.len(), 2);
    ///
    /// let map = photos.filter_map();
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map["first"].as_literal(), Some(&Literal::Int(5)));
    /// ```
    #[must_use]
    pub fn filter_map(&self) -> IndexMap<&str, &Value> {
        let mut map = IndexMap::with_capacity(self.filters.len());
        for filter in &self.filters {
            map.insert(filter.name.as_str(), &filter.value);
        }
        map
    }

    /// Iterates over the leaf field names, skipping nested selections.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().filter_map(|p| match p {
            Property::Field { name } => Some(name.as_str()),
            Property::Selection(_) => None,
        })
    }

    /// Returns the nested selection with the given name.
    #[must_use]
    pub fn selection(&self, name: &str) -> Option<&Selection> {
        self.properties.iter().find_map(|p| match p {
            Property::Selection(s) if s.name == name => Some(s),
            _ => None,
        })
    }

    fn validate(&self, depth: usize) -> Result<()> {
        check_identifier(&self.name, "selection")?;
        if depth > DEFAULT_MAX_DEPTH {
            return Err(Error::unsupported(&format!(
                "selection '{}' is nested deeper than {}",
                self.name, DEFAULT_MAX_DEPTH
            )));
        }
        match &self.params {
            Some(Value::Mapping(map)) if map.is_empty() => {
                return Err(Error::unsupported(&format!(
                    "selection '{}' has empty params; use no params instead",
                    self.name
                )))
            }
            Some(value) => check_value(value)?,
            None => {}
        }
        for filter in &self.filters {
            check_identifier(&filter.name, "filter")?;
            check_value(&filter.value)?;
        }
        if self.properties.is_empty() {
            return Err(Error::unsupported(&format!(
                "selection '{}' has no properties",
                self.name
            )));
        }
        for property in &self.properties {
            match property {
                Property::Field { name } => check_identifier(name, "field")?,
                Property::Selection(selection) => selection.validate(depth + 1)?,
            }
        }
        Ok(())
    }
}

/// A present `params` key is always `Some`, so `"params": null` stays `(null)`.
fn present_params<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn check_identifier(name: &str, what: &str) -> Result<()> {
    if crate::grammar::is_identifier(name) {
        Ok(())
    } else {
        Err(Error::unsupported(&format!(
            "invalid {} name '{}'",
            what, name
        )))
    }
}

fn check_value(value: &Value) -> Result<()> {
    if let Value::Mapping(map) = value {
        for key in map.keys() {
            check_identifier(key, "argument")?;
        }
    }
    Ok(())
}

/// A chained `.name(args)` operation on a selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub name: String,
    pub value: Value,
}

impl Filter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A child of a selection: a leaf field or a nested selection.
///
/// Deserializes from `{"name"}` as a field, or from an object with a
/// `properties` key as a selection. Any other key, or a malformed
/// selection, is an error.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Property {
    Selection(Selection),
    Field { name: String },
}

impl Property {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Property::Field { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Property::Field { name } => name,
            Property::Selection(selection) => &selection.name,
        }
    }

    #[must_use]
    pub const fn is_field(&self) -> bool {
        matches!(self, Property::Field { .. })
    }
}

/// Every key either variant may carry; the `properties` key decides which.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProperty {
    name: String,
    #[serde(default, deserialize_with = "present_params")]
    params: Option<Value>,
    #[serde(default, deserialize_with = "filter_list::deserialize")]
    filters: Vec<Filter>,
    properties: Option<Vec<Property>>,
}

impl<'de> Deserialize<'de> for Property {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        let raw = RawProperty::deserialize(deserializer)?;
        match raw.properties {
            Some(properties) => Ok(Property::Selection(Selection {
                name: raw.name,
                params: raw.params,
                filters: raw.filters,
                properties,
            })),
            None if raw.params.is_some() || !raw.filters.is_empty() => Err(D::Error::custom(
                format!("selection '{}' has params or filters but no properties", raw.name),
            )),
            None => Ok(Property::Field { name: raw.name }),
        }
    }
}

impl From<Selection> for Property {
    fn from(selection: Selection) -> Self {
        Property::Selection(selection)
    }
}

mod filter_list {
    use super::Filter;
    use crate::Value;
    use serde::de::{self, MapAccess, SeqAccess, Visitor};
    use serde::ser::SerializeSeq;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(filters: &[Filter], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(filters.len()))?;
        for filter in filters {
            seq.serialize_element(&(&filter.name, &filter.value))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Filter>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FilterListVisitor;

        impl<'de> Visitor<'de> for FilterListVisitor {
            type Value = Vec<Filter>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of [name, value] pairs or a map of filters")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut filters = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some((name, value)) = seq.next_element::<(String, Value)>()? {
                    filters.push(Filter { name, value });
                }
                Ok(filters)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut filters = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, Value>()? {
                    filters.push(Filter { name, value });
                }
                Ok(filters)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Vec::new())
            }
        }

        deserializer.deserialize_any(FilterListVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgMap, Literal};

    fn user() -> Selection {
        Selection::new("user").with_field("id").with_field("name")
    }

    #[test]
    fn test_builder_and_lookups() {
        let doc = Document::new().with_selection(
            user().with_selection(Selection::new("photo").with_field("url")),
        );

        let user = doc.get("user").unwrap();
        assert_eq!(user.fields().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(user.selection("photo").unwrap().properties.len(), 1);
        assert!(doc.get("photo").is_none());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_filter_lookup_is_last_write_wins() {
        let selection = user()
            .with_filter("after", 1)
            .with_filter("first", 10)
            .with_filter("after", 2);

        assert_eq!(selection.filter("after"), Some(&Value::from(2)));

        let keys: Vec<_> = selection.filter_map().keys().copied().collect();
        assert_eq!(keys, vec!["after", "first"]);
        assert_eq!(selection.filter_map()["after"], &Value::from(2));
    }

    fn nested(levels: usize) -> Document {
        let mut selection = Selection::new(format!("a{}", levels - 1)).with_field("x");
        for i in (0..levels - 1).rev() {
            selection = Selection::new(format!("a{}", i)).with_selection(selection);
        }
        Document::from(vec![selection])
    }

    #[test]
    fn test_validate_limits_nesting_depth() {
        assert!(nested(DEFAULT_MAX_DEPTH).validate().is_ok());

        let err = nested(DEFAULT_MAX_DEPTH + 1).validate().unwrap_err();
        assert!(matches!(err, Error::UnsupportedStructure(_)));
        assert!(err.to_string().contains("nested deeper than 128"));
    }

    #[test]
    fn test_validate_rejects_broken_documents() {
        assert!(Document::new().validate().is_err());
        assert!(Document::from(vec![Selection::new("user")]).validate().is_err());
        assert!(Document::from(vec![user().with_field("1bad")]).validate().is_err());
        assert!(Document::from(vec![user().with_params(ArgMap::new())])
            .validate()
            .is_err());

        let mut bad_key = ArgMap::new();
        bad_key.insert("not valid".to_string(), Literal::Null);
        assert!(Document::from(vec![user().with_filter("where", bad_key)])
            .validate()
            .is_err());

        assert!(Document::from(vec![user().with_filter("first", ArgMap::new())])
            .validate()
            .is_ok());
    }
}
