//! The result of a single token call.

use crate::value::{FromValue, Value};
use crate::{Error, Result};

/// Outcome of `try_parse`: an optional value plus a cursor.
///
/// The cursor is meaningful either way. On success it points just past the
/// consumed text; on failure it is the offset where matching gave up, which is
/// not necessarily the position the call started at.
///
/// # Examples
///
/// ```rust
/// use fieldtok::{Token, Value};
///
/// let out = Token::int().try_parse_default("12x", 0, 3);
/// assert_eq!(out.value, Some(Value::Int(12)));
/// assert_eq!(out.pos, 2);
///
/// let out = Token::int().try_parse_default("-x", 0, 2);
/// assert!(!out.is_present());
/// assert_eq!(out.pos, 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct ParseOutcome<T> {
    pub value: Option<T>,
    pub pos: usize,
}

impl<T> ParseOutcome<T> {
    #[inline]
    pub fn present(value: T, pos: usize) -> Self {
        ParseOutcome {
            value: Some(value),
            pos,
        }
    }

    #[inline]
    pub fn absent(pos: usize) -> Self {
        ParseOutcome { value: None, pos }
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Maps the value, keeping the cursor.
    pub fn map<U, F>(self, f: F) -> ParseOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        ParseOutcome {
            value: self.value.map(f),
            pos: self.pos,
        }
    }

    /// Converts into a `Result`, building diagnostics from `buf` on failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] (or [`Error::UnexpectedEof`] when the failure
    /// position is the end of `buf`) if the outcome is absent.
    pub fn into_result(self, buf: &str, expected: &str) -> Result<(T, usize)> {
        match self.value {
            Some(value) => Ok((value, self.pos)),
            None => Err(Error::parse(buf, self.pos, expected)),
        }
    }
}

impl<'a> ParseOutcome<Value<'a>> {
    /// Converts a present value to a Rust type, leaving absent outcomes absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value has the wrong shape for `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldtok::Token;
    ///
    /// let out = Token::nullable(Token::int()).try_parse_default("NA", 0, 2);
    /// let typed = out.extract::<Option<i64>>().unwrap();
    /// assert_eq!(typed.value, Some(None));
    /// ```
    pub fn extract<T: FromValue<'a>>(self) -> Result<ParseOutcome<T>> {
        let value = self.value.map(T::from_value).transpose()?;
        Ok(ParseOutcome {
            value,
            pos: self.pos,
        })
    }
}
