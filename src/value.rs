//! Argument values: primitive literals and named argument lists.
//!
//! ## Core Types
//!
//! - [`Literal`]: a primitive token value (null, boolean, integer, float, string)
//! - [`Value`]: what an argument list evaluates to, either one positional
//!   [`Literal`] or a name-keyed [`ArgMap`]
//!
//! Literals use JSON literal semantics in both directions: strings are
//! decoded and encoded with JSON escape rules, so anything `dumps` prints
//! is read back unchanged by `loads`.
//!
//! ## Examples
//!
//! ```rust
//! use gqlmark::{Literal, Value};
//!
//! let id = Value::from(232);
//! assert_eq!(id.as_literal(), Some(&Literal::Int(232)));
//!
//! assert_eq!(Literal::from("a \"b\"").to_string(), r#""a \"b\"""#);
//! assert_eq!(Literal::Float(2.0).to_string(), "2.0");
//! ```

use crate::{ArgMap, Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A primitive literal appearing in an argument list.
///
/// # Examples
///
/// ```rust
/// use gqlmark::Literal;
///
/// assert!(Literal::Null.is_null());
/// assert_eq!(Literal::from(true).as_bool(), Some(true));
/// assert_eq!(Literal::from(-12.334).as_f64(), Some(-12.334));
/// assert_eq!(Literal::from("Foobar").as_str(), Some("Foobar"));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Literal {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Literal {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Literal::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric value of an `Int` or `Float`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(i) => Some(*i as f64),
            Literal::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the literal kind, as used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Bool(_) => "boolean",
            Literal::Int(_) => "integer",
            Literal::Float(_) => "float",
            Literal::String(_) => "string",
        }
    }
}

/// Appends the JSON literal form of `literal` to `output`.
///
/// Fails for NaN and infinite floats, which have no literal form.
pub(crate) fn write_literal(output: &mut String, literal: &Literal) -> Result<()> {
    match literal {
        Literal::Null => output.push_str("null"),
        Literal::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        Literal::Int(i) => output.push_str(&i.to_string()),
        Literal::Float(f) => {
            if !f.is_finite() {
                return Err(Error::unsupported(&format!(
                    "float {} has no literal form",
                    f
                )));
            }
            // Display never uses exponent notation, so the grammar can read it back.
            let text = f.to_string();
            output.push_str(&text);
            if !text.contains('.') {
                output.push_str(".0");
            }
        }
        Literal::String(s) => {
            let encoded = serde_json::to_string(s).map_err(|e| Error::unsupported(&e.to_string()))?;
            output.push_str(&encoded);
        }
    }
    Ok(())
}

/// Raw token classes produced by the literal grammar rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LexemeKind {
    Null,
    True,
    False,
    Number,
    String,
}

/// Converts a recognized literal token into a typed [`Literal`].
///
/// The error string is a human-readable reason; the parser attaches the
/// position.
pub(crate) fn convert_literal(kind: LexemeKind, text: &str) -> std::result::Result<Literal, String> {
    match kind {
        LexemeKind::Null => Ok(Literal::Null),
        LexemeKind::True => Ok(Literal::Bool(true)),
        LexemeKind::False => Ok(Literal::Bool(false)),
        LexemeKind::Number if text.contains('.') => match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Literal::Float(f)),
            _ => Err(format!("number {} is out of range", text)),
        },
        LexemeKind::Number => text
            .parse::<i64>()
            .map(Literal::Int)
            .map_err(|_| format!("integer {} is out of range", text)),
        LexemeKind::String => decode_string(text).map(Literal::String),
    }
}

/// Decodes a single- or double-quoted string token with JSON escape rules.
///
/// `\'` is also accepted, and a bare `"` inside single quotes is literal.
fn decode_string(token: &str) -> std::result::Result<String, String> {
    let body = &token[1..token.len() - 1];
    let mut json = String::with_capacity(body.len() + 2);
    json.push('"');

    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('\'') => json.push('\''),
                Some(other) => {
                    json.push('\\');
                    json.push(other);
                }
                None => json.push('\\'),
            },
            '"' => json.push_str("\\\""),
            other => json.push(other),
        }
    }
    json.push('"');

    serde_json::from_str::<String>(&json).map_err(|e| format!("invalid string literal: {}", e))
}

/// Formats the literal as it appears in query text.
///
/// NaN and infinite floats have no literal form; they display as `NaN`,
/// `inf` and `-inf` for diagnostics, and `dumps` rejects them.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Float(fl) if !fl.is_finite() => write!(f, "{}", fl),
            _ => {
                let mut text = String::new();
                write_literal(&mut text, self).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

impl Serialize for Literal {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Literal::Null => serializer.serialize_unit(),
            Literal::Bool(b) => serializer.serialize_bool(*b),
            Literal::Int(i) => serializer.serialize_i64(*i),
            Literal::Float(f) => serializer.serialize_f64(*f),
            Literal::String(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct LiteralVisitor;

        impl<'de> Visitor<'de> for LiteralVisitor {
            type Value = Literal;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("null, a boolean, a number or a string")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(Literal::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(Literal::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Literal::Int)
                    .map_err(|_| E::custom(format!("integer {} is out of range", value)))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(Literal::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(Literal::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(Literal::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Literal::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Literal::Null)
            }
        }

        deserializer.deserialize_any(LiteralVisitor)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(value as i64)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<u32> for Literal {
    fn from(value: u32) -> Self {
        Literal::Int(value as i64)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<()> for Literal {
    fn from(_: ()) -> Self {
        Literal::Null
    }
}

/// The evaluated form of an argument list.
///
/// `(232)` becomes `Value::Literal(Literal::Int(232))`; `(id: 232)` and
/// `()` become a `Value::Mapping`.
///
/// # Examples
///
/// ```rust
/// use gqlmark::{args, Literal, Value};
///
/// let value = args! { "id" => 232, "name" => "Hebe" };
/// assert!(value.is_mapping());
/// assert_eq!(value.get("name"), Some(&Literal::from("Hebe")));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Literal(Literal),
    Mapping(ArgMap),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Value::Literal(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Value::Literal(l) => Some(l),
            Value::Mapping(_) => None,
        }
    }

    #[must_use]
    pub fn as_mapping(&self) -> Option<&ArgMap> {
        match self {
            Value::Mapping(m) => Some(m),
            Value::Literal(_) => None,
        }
    }

    /// Looks up a named argument; always `None` for a positional literal.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Literal> {
        self.as_mapping().and_then(|m| m.get(name))
    }
}

impl From<Literal> for Value {
    fn from(value: Literal) -> Self {
        Value::Literal(value)
    }
}

macro_rules! value_from_primitive {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Literal(Literal::from(value))
                }
            }
        )*
    };
}

value_from_primitive!(bool, i32, i64, u32, f64, String, &str, ());

impl From<ArgMap> for Value {
    fn from(value: ArgMap) -> Self {
        Value::Mapping(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(literal: &Literal) -> String {
        let mut out = String::new();
        write_literal(&mut out, literal).unwrap();
        out
    }

    #[test]
    fn test_convert_keywords_and_numbers() {
        assert_eq!(convert_literal(LexemeKind::Null, "null"), Ok(Literal::Null));
        assert_eq!(convert_literal(LexemeKind::True, "true"), Ok(Literal::Bool(true)));
        assert_eq!(convert_literal(LexemeKind::False, "false"), Ok(Literal::Bool(false)));
        assert_eq!(convert_literal(LexemeKind::Number, "42"), Ok(Literal::Int(42)));
        assert_eq!(convert_literal(LexemeKind::Number, "-12.334"), Ok(Literal::Float(-12.334)));
        assert_eq!(convert_literal(LexemeKind::Number, "2.0"), Ok(Literal::Float(2.0)));
    }

    #[test]
    fn test_convert_out_of_range_integer() {
        let err = convert_literal(LexemeKind::Number, "99999999999999999999").unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn test_decode_both_quote_styles() {
        assert_eq!(
            convert_literal(LexemeKind::String, r#""Foobar""#),
            Ok(Literal::from("Foobar"))
        );
        assert_eq!(
            convert_literal(LexemeKind::String, "'Barbaz'"),
            Ok(Literal::from("Barbaz"))
        );
        assert_eq!(
            convert_literal(LexemeKind::String, r#"'say "hi"'"#),
            Ok(Literal::from("say \"hi\""))
        );
        assert_eq!(
            convert_literal(LexemeKind::String, r"'it\'s'"),
            Ok(Literal::from("it's"))
        );
        assert_eq!(
            convert_literal(LexemeKind::String, r#""tab\there é 😀""#),
            Ok(Literal::from("tab\there é 😀"))
        );
    }

    #[test]
    fn test_decode_rejects_unknown_escape() {
        assert!(convert_literal(LexemeKind::String, r#""bad \q""#).is_err());
    }

    #[test]
    fn test_encode_literals() {
        assert_eq!(encode(&Literal::Null), "null");
        assert_eq!(encode(&Literal::Bool(false)), "false");
        assert_eq!(encode(&Literal::Int(-7)), "-7");
        assert_eq!(encode(&Literal::Float(0.5)), "0.5");
        assert_eq!(encode(&Literal::Float(1e20)), "100000000000000000000.0");
        assert_eq!(encode(&Literal::from("line\nbreak")), r#""line\nbreak""#);
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        let mut out = String::new();
        let err = write_literal(&mut out, &Literal::Float(f64::NAN)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedStructure(_)));
    }

    #[test]
    fn test_display_non_finite_is_not_a_literal() {
        assert_eq!(Literal::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Literal::Float(f64::NEG_INFINITY).to_string(), "-inf");
        assert!(write_literal(&mut String::new(), &Literal::Float(f64::INFINITY)).is_err());
        assert_eq!(Literal::from("x").to_string(), "\"x\"");
    }

    #[test]
    fn test_value_accessors() {
        let scalar = Value::from("x");
        assert!(scalar.is_literal());
        assert_eq!(scalar.get("x"), None);

        let mut map = ArgMap::new();
        map.insert("id".to_string(), Literal::from(1));
        let mapping = Value::from(map);
        assert!(mapping.is_mapping());
        assert_eq!(mapping.get("id"), Some(&Literal::Int(1)));
    }
}
