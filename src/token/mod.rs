//! The closed set of field tokens.
//!
//! A [`Token`] parses one value starting at an arbitrary buffer position. Leaf
//! tokens recognise a value type; wrapper tokens ([`Quoted`], [`Nullable`],
//! [`Field`], [`Token::WithOptions`]) add policy around an inner token. Calls
//! recurse top-down passing position and [`LocalOpts`]; outcomes propagate
//! bottom-up.
//!
//! Tokens are immutable and hold no per-call state, so one token graph can be
//! shared across rows, columns and threads.
//!
//! ## Composition
//!
//! ```rust
//! use fieldtok::{LocalOpts, Token, Value};
//!
//! // A CSV column of optional, possibly quoted integers
//! let column = Token::field(Token::nullable(Token::quoted(Token::int())));
//!
//! let row = "\"12\",NA,7\n";
//! let opts = LocalOpts::default();
//!
//! let a = column.try_parse(row, 0, row.len(), &opts);
//! assert_eq!(a.value, Some(Value::Int(12)));
//! let b = column.try_parse(row, a.pos, row.len(), &opts);
//! assert_eq!(b.value, Some(Value::Null));
//! ```

mod datetime;
mod field;
mod nullable;
mod numeric;
mod percentage;
mod quoted;
mod string;

pub use datetime::{DateTimeToken, TemporalKind};
pub use field::Field;
pub use nullable::{NullSentinels, Nullable};
pub use numeric::{Numeric, NumericKind};
pub use percentage::Percentage;
pub use quoted::Quoted;
pub use string::{StrTarget, StringToken};

use crate::options::{LocalOpts, NumberFormat};
use crate::outcome::ParseOutcome;
use crate::value::{Value, ValueType};
use std::fmt;
use std::sync::Arc;

/// A parser for one value type, invocable at any buffer position.
#[derive(Clone, Debug)]
pub enum Token {
    Numeric(Numeric),
    Percentage(Percentage),
    String(StringToken),
    Quoted(Quoted),
    Nullable(Nullable),
    DateTime(DateTimeToken),
    Field(Field),
    Custom(CustomToken),
    /// Parses the inner token with fixed options, ignoring the ambient ones.
    WithOptions(Box<Token>, LocalOpts),
    /// Placeholder for a column whose type is not known yet.
    Unknown,
}

impl Token {
    /// Parses one value at `pos`, never reading at or past `limit`.
    ///
    /// `limit` and `pos` are clamped to `buf.len()`; `pos` must lie on a char boundary.
    pub fn try_parse<'a>(
        &self,
        buf: &'a str,
        pos: usize,
        limit: usize,
        opts: &LocalOpts,
    ) -> ParseOutcome<Value<'a>> {
        let limit = limit.min(buf.len());
        let pos = pos.min(buf.len());
        match self {
            Token::Numeric(t) => t.try_parse(buf, pos, limit),
            Token::Percentage(t) => t.try_parse(buf, pos, limit),
            Token::String(t) => t.try_parse(buf, pos, limit, opts),
            Token::Quoted(t) => t.try_parse(buf, pos, limit, opts),
            Token::Nullable(t) => t.try_parse(buf, pos, limit, opts),
            Token::DateTime(t) => t.try_parse(buf, pos, limit, opts),
            Token::Field(t) => t.try_parse(buf, pos, limit, opts),
            Token::Custom(t) => (t.f)(buf, pos, limit, opts),
            Token::WithOptions(inner, own) => inner.try_parse(buf, pos, limit, own),
            Token::Unknown => ParseOutcome::present(Value::Null, pos),
        }
    }

    /// [`try_parse`](Token::try_parse) with [`LocalOpts::DEFAULT`].
    pub fn try_parse_default<'a>(
        &self,
        buf: &'a str,
        pos: usize,
        limit: usize,
    ) -> ParseOutcome<Value<'a>> {
        self.try_parse(buf, pos, limit, &LocalOpts::DEFAULT)
    }

    /// The value type this token produces when it succeeds.
    pub fn value_type(&self) -> ValueType {
        match self {
            Token::Numeric(t) => t.value_type(),
            Token::Percentage(_) => ValueType::Float,
            Token::String(t) => t.value_type(),
            Token::Quoted(t) => t.inner().value_type(),
            Token::Nullable(t) => ValueType::nullable(t.inner().value_type()),
            Token::DateTime(t) => t.value_type(),
            Token::Field(t) => t.inner().value_type(),
            Token::Custom(t) => t.value_type.clone(),
            Token::WithOptions(inner, _) => inner.value_type(),
            Token::Unknown => ValueType::Missing,
        }
    }

    /// Whether [`value_type`](Token::value_type) is [`ValueType::Missing`], without building it.
    pub(crate) fn is_missing(&self) -> bool {
        match self {
            Token::Unknown => true,
            Token::Quoted(t) => t.inner().is_missing(),
            Token::Nullable(t) => t.inner().is_missing(),
            Token::Field(t) => t.inner().is_missing(),
            Token::WithOptions(inner, _) => inner.is_missing(),
            Token::Custom(t) => t.value_type == ValueType::Missing,
            _ => false,
        }
    }

    /// The default leaf (or nullable wrapper) for a value type.
    ///
    /// Temporal types use ISO 8601 layouts (`%Y-%m-%d`, `%H:%M:%S`, `%Y-%m-%dT%H:%M:%S`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldtok::{Token, ValueType};
    ///
    /// let token = Token::for_type(&ValueType::nullable(ValueType::Float));
    /// assert_eq!(token.value_type(), ValueType::nullable(ValueType::Float));
    /// ```
    pub fn for_type(ty: &ValueType) -> Token {
        match ty {
            ValueType::Missing => Token::Unknown,
            ValueType::Int => Token::int(),
            ValueType::UInt => Token::uint(),
            ValueType::Float => Token::float(),
            ValueType::String => Token::string(StrTarget::Owned),
            ValueType::StrView => Token::string(StrTarget::View),
            ValueType::Str => Token::string(StrTarget::Slice),
            ValueType::Date => Token::DateTime(DateTimeToken::new(TemporalKind::Date, "%Y-%m-%d")),
            ValueType::Time => Token::DateTime(DateTimeToken::new(TemporalKind::Time, "%H:%M:%S")),
            ValueType::DateTime => Token::DateTime(DateTimeToken::new(
                TemporalKind::DateTime,
                "%Y-%m-%dT%H:%M:%S",
            )),
            ValueType::Nullable(inner) => Token::nullable(Token::for_type(inner)),
        }
    }

    pub fn int() -> Token {
        Token::Numeric(Numeric::new(NumericKind::Int))
    }

    pub fn uint() -> Token {
        Token::Numeric(Numeric::new(NumericKind::UInt))
    }

    pub fn float() -> Token {
        Token::Numeric(Numeric::new(NumericKind::Float))
    }

    pub fn float_with_format(format: NumberFormat) -> Token {
        Token::Numeric(Numeric::new(NumericKind::Float).with_format(format))
    }

    pub fn percentage() -> Token {
        Token::Percentage(Percentage::new())
    }

    pub fn percentage_with_format(format: NumberFormat) -> Token {
        Token::Percentage(Percentage::new().with_format(format))
    }

    pub fn string(target: StrTarget) -> Token {
        Token::String(StringToken::new(target))
    }

    pub fn date(format: &str) -> Token {
        Token::DateTime(DateTimeToken::new(TemporalKind::Date, format))
    }

    pub fn time(format: &str) -> Token {
        Token::DateTime(DateTimeToken::new(TemporalKind::Time, format))
    }

    pub fn datetime(format: &str) -> Token {
        Token::DateTime(DateTimeToken::new(TemporalKind::DateTime, format))
    }

    /// Quoted wrapper with default settings.
    pub fn quoted(inner: Token) -> Token {
        Token::Quoted(Quoted::new(inner))
    }

    /// Nullable wrapper with the default sentinel table and `emptyisna = true`.
    pub fn nullable(inner: Token) -> Token {
        Token::Nullable(Nullable::new(inner))
    }

    /// Field driver with default whitespace handling and no line-end delimiting.
    pub fn field(inner: Token) -> Token {
        Token::Field(Field::new(inner))
    }

    pub fn with_options(inner: Token, opts: LocalOpts) -> Token {
        Token::WithOptions(Box::new(inner), opts)
    }

    /// Wraps a user function as a token declaring `value_type`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldtok::{ParseOutcome, Token, Value, ValueType};
    ///
    /// // "yes"/"no" as 1/0
    /// let flag = Token::custom(ValueType::Int, |buf, pos, limit, _opts| {
    ///     let rest = &buf[pos..limit];
    ///     if rest.starts_with("yes") {
    ///         ParseOutcome::present(Value::Int(1), pos + 3)
    ///     } else if rest.starts_with("no") {
    ///         ParseOutcome::present(Value::Int(0), pos + 2)
    ///     } else {
    ///         ParseOutcome::absent(pos)
    ///     }
    /// });
    ///
    /// let out = Token::field(flag).try_parse_default("yes,no", 0, 6);
    /// assert_eq!(out.value, Some(Value::Int(1)));
    /// assert_eq!(out.pos, 4);
    /// ```
    pub fn custom<F>(value_type: ValueType, f: F) -> Token
    where
        F: for<'a> Fn(&'a str, usize, usize, &LocalOpts) -> ParseOutcome<Value<'a>>
            + Send
            + Sync
            + 'static,
    {
        Token::Custom(CustomToken::new(value_type, f))
    }
}

type CustomFn =
    dyn for<'a> Fn(&'a str, usize, usize, &LocalOpts) -> ParseOutcome<Value<'a>> + Send + Sync;

/// A user-supplied parse function with a declared value type.
///
/// The function must follow the same contract as every other token: stay
/// within `limit` and report a meaningful cursor.
#[derive(Clone)]
pub struct CustomToken {
    value_type: ValueType,
    f: Arc<CustomFn>,
}

impl CustomToken {
    pub fn new<F>(value_type: ValueType, f: F) -> Self
    where
        F: for<'a> Fn(&'a str, usize, usize, &LocalOpts) -> ParseOutcome<Value<'a>>
            + Send
            + Sync
            + 'static,
    {
        CustomToken {
            value_type,
            f: Arc::new(f),
        }
    }
}

impl fmt::Debug for CustomToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomToken")
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}
