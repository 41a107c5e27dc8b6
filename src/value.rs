use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::fmt;
use uuid::Uuid;

use crate::format::general_double;
use crate::types::datetime_utils;

/// A loosely-typed value as it arrives from a database row, a config file
/// or an untyped document.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    /// Database "no data" marker, distinct from an absent value.
    DbNull,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Decimal(Decimal),
    Text(String),
    DateTime(NaiveDateTime),
    Guid(Uuid),
    /// Opaque value known only by its string rendering.
    Other(String),
}

/// Runtime kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    DbNull,
    Bool,
    Int,
    Long,
    Double,
    Decimal,
    Text,
    DateTime,
    Guid,
    Other,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::DbNull => "dbnull",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::Double => "double",
            ValueKind::Decimal => "decimal",
            ValueKind::Text => "text",
            ValueKind::DateTime => "datetime",
            ValueKind::Guid => "guid",
            ValueKind::Other => "other",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::DbNull => ValueKind::DbNull,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Long(_) => ValueKind::Long,
            Value::Double(_) => ValueKind::Double,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Text(_) => ValueKind::Text,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Guid(_) => ValueKind::Guid,
            Value::Other(_) => ValueKind::Other,
        }
    }

    /// The value's string form, borrowed when it is already text.
    pub fn string_form(&self) -> Cow<'_, str> {
        match self {
            Value::Text(s) | Value::Other(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

/// The string form every predicate falls back to. Null-equivalent values
/// render as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::DbNull => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Long(l) => write!(f, "{l}"),
            Value::Double(d) => f.write_str(&general_double(*d)),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Text(s) | Value::Other(s) => f.write_str(s),
            Value::DateTime(dt) => f.write_str(&datetime_utils::format_datetime(dt)),
            Value::Guid(g) => write!(f, "{}", g.hyphenated()),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i32 => Int,
    i64 => Long,
    f64 => Double,
    Decimal => Decimal,
    String => Text,
    NaiveDateTime => DateTime,
    Uuid => Guid,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
