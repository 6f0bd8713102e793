//! Values produced by tokens.
//!
//! This module provides:
//!
//! - [`Value`]: the dynamically-typed result of any token call
//! - [`StrView`]: a zero-copy `(offset, length)` descriptor into the parsed buffer
//! - [`ValueType`]: the declared value type of a token, as reported by
//!   [`Token::value_type`](crate::Token::value_type)
//! - [`FromValue`]: conversion from [`Value`] into concrete Rust types
//!
//! ## Extracting Values
//!
//! ```rust
//! use fieldtok::{FromValue, Value};
//!
//! let n = i64::from_value(Value::Int(42)).unwrap();
//! assert_eq!(n, 42);
//!
//! // Null becomes None for optional targets
//! let missing = Option::<i64>::from_value(Value::Null).unwrap();
//! assert_eq!(missing, None);
//! ```

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;

/// A parsed field value.
///
/// `Str` borrows from the buffer that was parsed, `View` only records where the
/// text lives, and `String` owns a copy.
///
/// Values serialize untagged, so a parsed row can be dumped as JSON directly.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value<'a> {
    /// A recognised missing value (null sentinel, empty field or unknown column).
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    View(StrView),
    Str(&'a str),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl<'a> Value<'a> {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "integer",
            Value::UInt(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::View(_) => "string view",
            Value::Str(_) => "string slice",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Returns the text of a string-like value, resolving views against `buf`.
    pub fn as_text<'b>(&'b self, buf: &'b str) -> Option<&'b str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            Value::Str(s) => Some(*s),
            Value::View(view) => view.resolve(buf),
            _ => None,
        }
    }
}

/// Zero-copy location of a string inside the buffer it was extracted from.
///
/// # Examples
///
/// ```rust
/// use fieldtok::{StrTarget, Token, Value};
///
/// let buf = "alpha,beta";
/// let out = Token::string(StrTarget::View).try_parse_default(buf, 6, buf.len());
/// match out.value {
///     Some(Value::View(view)) => assert_eq!(view.resolve(buf), Some("beta")),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct StrView {
    pub offset: usize,
    pub len: usize,
}

impl StrView {
    pub fn new(offset: usize, len: usize) -> Self {
        StrView { offset, len }
    }

    /// Looks the text up in `buf`; `None` if the view does not fit.
    pub fn resolve<'b>(&self, buf: &'b str) -> Option<&'b str> {
        buf.get(self.offset..self.offset.checked_add(self.len)?)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// The value type a token declares it produces.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Nothing is known yet; produced only by the unknown placeholder.
    Missing,
    Int,
    UInt,
    Float,
    String,
    StrView,
    Str,
    Date,
    Time,
    DateTime,
    Nullable(Box<ValueType>),
}

impl ValueType {
    /// Wraps `inner` as nullable. A nullable missing type is just missing, and
    /// nullable types do not nest.
    pub fn nullable(inner: ValueType) -> ValueType {
        match inner {
            ValueType::Missing => ValueType::Missing,
            ValueType::Nullable(_) => inner,
            other => ValueType::Nullable(Box::new(other)),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Int | ValueType::UInt | ValueType::Float)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Missing => f.write_str("missing"),
            ValueType::Int => f.write_str("integer"),
            ValueType::UInt => f.write_str("unsigned integer"),
            ValueType::Float => f.write_str("float"),
            ValueType::String => f.write_str("string"),
            ValueType::StrView => f.write_str("string view"),
            ValueType::Str => f.write_str("string slice"),
            ValueType::Date => f.write_str("date"),
            ValueType::Time => f.write_str("time"),
            ValueType::DateTime => f.write_str("datetime"),
            ValueType::Nullable(inner) => write!(f, "nullable {}", inner),
        }
    }
}

/// Conversion from a parsed [`Value`] into a concrete Rust type.
pub trait FromValue<'a>: Sized {
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `value` has the wrong shape.
    fn from_value(value: Value<'a>) -> Result<Self>;
}

fn mismatch<T>(expected: &str, value: &Value<'_>) -> Result<T> {
    Err(Error::type_mismatch(expected, value.kind()))
}

impl<'a> FromValue<'a> for Value<'a> {
    fn from_value(value: Value<'a>) -> Result<Self> {
        Ok(value)
    }
}

impl<'a> FromValue<'a> for i64 {
    fn from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            Value::UInt(u) => i64::try_from(u)
                .map_err(|_| Error::custom(format!("cannot convert {} to i64", u))),
            other => mismatch("integer", &other),
        }
    }
}

impl<'a> FromValue<'a> for u64 {
    fn from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::UInt(u) => Ok(u),
            Value::Int(i) => u64::try_from(i)
                .map_err(|_| Error::custom(format!("cannot convert {} to u64", i))),
            other => mismatch("unsigned integer", &other),
        }
    }
}

impl<'a> FromValue<'a> for f64 {
    fn from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            Value::UInt(u) => Ok(u as f64),
            other => mismatch("float", &other),
        }
    }
}

impl<'a> FromValue<'a> for String {
    fn from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            Value::Str(s) => Ok(s.to_string()),
            other => mismatch("string", &other),
        }
    }
}

impl<'a> FromValue<'a> for &'a str {
    fn from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => mismatch("string slice", &other),
        }
    }
}

impl<'a> FromValue<'a> for StrView {
    fn from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::View(view) => Ok(view),
            other => mismatch("string view", &other),
        }
    }
}

impl<'a> FromValue<'a> for NaiveDate {
    fn from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Date(d) => Ok(d),
            other => mismatch("date", &other),
        }
    }
}

impl<'a> FromValue<'a> for NaiveTime {
    fn from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Time(t) => Ok(t),
            other => mismatch("time", &other),
        }
    }
}

impl<'a> FromValue<'a> for NaiveDateTime {
    fn from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            other => mismatch("datetime", &other),
        }
    }
}

impl<'a, T: FromValue<'a>> FromValue<'a> for Option<T> {
    fn from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_resolve_out_of_bounds() {
        assert_eq!(StrView::new(2, 3).resolve("abcde"), Some("cde"));
        assert_eq!(StrView::new(2, 4).resolve("abcde"), None);
        assert_eq!(StrView::new(usize::MAX, 1).resolve("abcde"), None);
    }

    #[test]
    fn test_nullable_type_normalization() {
        assert_eq!(ValueType::nullable(ValueType::Missing), ValueType::Missing);
        let once = ValueType::nullable(ValueType::Int);
        assert_eq!(ValueType::nullable(once.clone()), once);
        assert_eq!(once.to_string(), "nullable integer");
    }

    #[test]
    fn test_integer_conversions() {
        assert_eq!(i64::from_value(Value::UInt(5)).unwrap(), 5);
        assert!(i64::from_value(Value::UInt(u64::MAX)).is_err());
        assert!(u64::from_value(Value::Int(-1)).is_err());
        assert_eq!(f64::from_value(Value::Int(-3)).unwrap(), -3.0);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Option::<f64>::from_value(Value::Float(0.5)).unwrap(), Some(0.5));
        assert_eq!(Option::<String>::from_value(Value::Null).unwrap(), None);
        assert!(Option::<i64>::from_value(Value::Str("x")).is_err());
    }

    #[test]
    fn test_serialize_row() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let row = vec![
            Value::Int(-3),
            Value::Null,
            Value::Str("abc"),
            Value::Date(date),
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[-3,null,"abc","2024-01-15"]"#);
    }

    #[test]
    fn test_as_text() {
        let buf = "hello,world";
        assert_eq!(Value::View(StrView::new(6, 5)).as_text(buf), Some("world"));
        assert_eq!(Value::Str("hi").as_text(buf), Some("hi"));
        assert_eq!(Value::Int(1).as_text(buf), None);
    }
}
