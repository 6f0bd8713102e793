//! # fieldtok
//!
//! Composable field-level tokenizers for delimited text (CSV, TSV and friends).
//!
//! ## What is it?
//!
//! Each [`Token`] turns the text at some position of a buffer into a typed
//! [`Value`]: integers, floats, percentages, strings, dates, or nulls. Tokens
//! nest: a [`Field`] handles whitespace and the column terminator, a
//! [`Nullable`] recognises missing values such as `NA`, and a [`Quoted`]
//! strips quotes before handing the inside to the value token.
//!
//! ## Key Features
//!
//! - **No exceptions for bad input**: a failed match is an absent [`ParseOutcome`]
//!   with the position where matching gave up
//! - **Configurable dialects**: delimiter, quote and escape chars, space-delimited
//!   rows, CRLF/LF handling, custom null sentinels and number formats
//! - **Zero-copy strings**: borrow (`&str`) or locate ([`StrView`]) fields instead of copying
//! - **Type inference support**: an [`Token::Unknown`] placeholder and
//!   [`Token::WithOptions`] overrides for column-type guessers
//! - **Shareable**: tokens are immutable, `Send + Sync`, and reusable across rows
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldtok::{parse_row, Field, LocalOpts, StrTarget, Token, Value};
//!
//! let columns = vec![
//!     Token::field(Token::quoted(Token::string(StrTarget::Slice))),
//!     Token::field(Token::nullable(Token::int())),
//!     Token::Field(Field::new(Token::percentage()).eoldelim(true)),
//! ];
//!
//! let text = "\"Smith, J\",NA,12.5%\n";
//! let (row, next) = parse_row(&columns, text, 0, &LocalOpts::default()).unwrap();
//!
//! assert_eq!(row, vec![Value::Str("Smith, J"), Value::Null, Value::Float(0.125)]);
//! assert_eq!(next, text.len());
//! ```
//!
//! ### Typed values
//!
//! ```rust
//! use fieldtok::{parse, Token};
//!
//! let n: Option<i64> = parse(&Token::nullable(Token::int()), "NULL").unwrap();
//! assert_eq!(n, None);
//!
//! let f: f64 = parse(&Token::float(), "-1.5e3").unwrap();
//! assert_eq!(f, -1500.0);
//! ```
//!
//! ## Scope
//!
//! This crate tokenizes fields. Reading files, detecting headers and guessing
//! column types belong to the caller.

pub mod error;
pub mod options;
pub mod outcome;
mod scan;
pub mod token;
pub mod value;

pub use error::{Error, Result};
pub use options::{LocalOpts, NumberFormat};
pub use outcome::ParseOutcome;
pub use token::{
    CustomToken, DateTimeToken, Field, NullSentinels, Nullable, Numeric, NumericKind, Percentage,
    Quoted, StrTarget, StringToken, TemporalKind, Token,
};
pub use value::{FromValue, StrView, Value, ValueType};

use log::debug;

/// Parses one value from the start of `input` with the default options.
///
/// The token does not have to consume all of `input`.
///
/// # Errors
///
/// Returns an error with line/column information if the token does not match,
/// or a type mismatch if the value cannot be converted to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse<'a, T>(token: &Token, input: &'a str) -> Result<T>
where
    T: FromValue<'a>,
{
    parse_with_options(token, input, &LocalOpts::DEFAULT)
}

/// Parses one value from the start of `input` with custom options.
///
/// # Examples
///
/// ```rust
/// use fieldtok::{parse_with_options, LocalOpts, StrTarget, Token};
///
/// let opts = LocalOpts::new().with_delimiter(';');
/// let s: String = parse_with_options(&Token::string(StrTarget::Owned), "a,b;c", &opts).unwrap();
/// assert_eq!(s, "a,b");
/// ```
///
/// # Errors
///
/// Same as [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options<'a, T>(token: &Token, input: &'a str, opts: &LocalOpts) -> Result<T>
where
    T: FromValue<'a>,
{
    let expected = token.value_type().to_string();
    let (value, _) = token
        .try_parse(input, 0, input.len(), opts)
        .into_result(input, &expected)?;
    T::from_value(value)
}

/// Parses one row starting at `pos`: one token per column, in order.
///
/// Each token is normally a [`Field`], the last one with `eoldelim` set so it
/// accepts the line break. Returns the values and the position after the row.
///
/// # Errors
///
/// Returns [`Error::InvalidOptions`] if `opts` fail [`LocalOpts::validate`],
/// and a parse error pointing at the first column that fails.
pub fn parse_row<'a>(
    columns: &[Token],
    buf: &'a str,
    pos: usize,
    opts: &LocalOpts,
) -> Result<(Vec<Value<'a>>, usize)> {
    opts.validate()?;
    let mut values = Vec::with_capacity(columns.len());
    let mut cur = pos;
    for (i, column) in columns.iter().enumerate() {
        let outcome = column.try_parse(buf, cur, buf.len(), opts);
        if !outcome.is_present() {
            debug!("column {} failed at offset {}", i + 1, outcome.pos);
        }
        let expected = format!("{} in column {}", column.value_type(), i + 1);
        let (value, next) = outcome.into_result(buf, &expected)?;
        values.push(value);
        cur = next;
    }
    Ok((values, cur))
}
