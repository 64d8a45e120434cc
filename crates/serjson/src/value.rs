//! Parsed and constructed values.
//!
//! This module defines the [`Value`] enum and its compact text rendering.
//! Strings are written verbatim between quotes: embedded quotes and control
//! bytes are not escaped, matching what the lexer accepts.
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use crate::error::TypeMismatch;

pub type Map = BTreeMap<String, Value>;
pub type Array = Vec<Value>;

static EMPTY_MAP: Map = Map::new();

/// A value on the wire.
///
/// - Null
/// - Boolean
/// - Integer (32-bit signed)
/// - Float (32-bit)
/// - String
/// - Array
/// - Object
///
/// # Examples
///
/// ```
/// use serjson::{Map, Value};
///
/// let mut status = Map::new();
/// status.insert("mode".into(), Value::Integer(0));
/// status.insert("led".into(), Value::Float(0.0));
/// let mut map = Map::new();
/// map.insert("status".into(), Value::Object(status));
/// assert_eq!(Value::Object(map).to_string(), r#"{"status":{"led":0,"mode":0}}"#);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i32),
    Float(f32),
    String(String),
    Array(Array),
    Object(Map),
}

/// The payload-free discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Self::Object(v)
    }
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(..))
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    ///
    /// # Examples
    ///
    /// ```
    /// use serjson::Value;
    ///
    /// assert!(Value::Array(vec![Value::Null]).is_array());
    /// assert!(!Value::Null.is_array());
    /// ```
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Either numeric variant as `f32`.
    ///
    /// The lexer has no way to tell `1` from `1.0` apart from the dot, so
    /// callers that expect a float usually want to accept both.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Integer(n) => Some(*n as f32),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up `key` when the value is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }

    /// Checks the tag, logging a warning on mismatch.
    ///
    /// # Errors
    ///
    /// [`TypeMismatch`] naming both kinds when `self` is not `expected`.
    pub fn expect_kind(&self, expected: ValueKind) -> Result<(), TypeMismatch> {
        let found = self.kind();
        if found == expected {
            return Ok(());
        }
        let err = TypeMismatch { expected, found };
        tracing::warn!(target: "serjson::value", "{err}");
        Err(err)
    }

    /// The boolean payload, or `false` (logged) for any other variant.
    #[must_use]
    pub fn bool_or_default(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            other => other.mismatch(ValueKind::Boolean),
        }
    }

    /// The integer payload, or `0` (logged) for any other variant.
    #[must_use]
    pub fn int_or_default(&self) -> i32 {
        match self {
            Self::Integer(n) => *n,
            other => other.mismatch(ValueKind::Integer),
        }
    }

    /// The float payload, or `0.0` (logged) for any other variant.
    #[must_use]
    pub fn float_or_default(&self) -> f32 {
        match self {
            Self::Float(n) => *n,
            other => other.mismatch(ValueKind::Float),
        }
    }

    /// The string payload, or `""` (logged) for any other variant.
    #[must_use]
    pub fn str_or_default(&self) -> &str {
        match self {
            Self::String(s) => s,
            other => other.mismatch(ValueKind::String),
        }
    }

    /// The elements, or an empty slice (logged) for any other variant.
    #[must_use]
    pub fn array_or_empty(&self) -> &[Value] {
        match self {
            Self::Array(a) => a,
            other => other.mismatch(ValueKind::Array),
        }
    }

    /// The entries, or an empty map (logged) for any other variant.
    #[must_use]
    pub fn object_or_empty(&self) -> &Map {
        match self {
            Self::Object(m) => m,
            _ => {
                let _ = self.expect_kind(ValueKind::Object);
                &EMPTY_MAP
            }
        }
    }

    fn mismatch<T: Default>(&self, expected: ValueKind) -> T {
        let _ = self.expect_kind(expected);
        T::default()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "\"{k}\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
