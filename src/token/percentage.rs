//! Percentages such as `42.5%`.

use super::numeric::parse_float;
use crate::options::NumberFormat;
use crate::outcome::ParseOutcome;
use crate::scan::{peek, skip_whitespace};
use crate::value::Value;

/// A float followed by `%`, divided by 100.
///
/// Whitespace is allowed between the number and the sign. Without the sign
/// the numeric match is discarded and the token fails where the `%` was expected.
///
/// # Examples
///
/// ```rust
/// use fieldtok::{Token, Value};
///
/// let out = Token::percentage().try_parse_default("42.5%", 0, 5);
/// assert_eq!(out.value, Some(Value::Float(0.425)));
/// assert_eq!(out.pos, 5);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Percentage {
    format: NumberFormat,
}

impl Percentage {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    pub(crate) fn try_parse<'a>(
        &self,
        buf: &'a str,
        pos: usize,
        limit: usize,
    ) -> ParseOutcome<Value<'a>> {
        let number = parse_float(buf, pos, limit, &self.format);
        let Some(value) = number.value else {
            return ParseOutcome::absent(number.pos);
        };
        let cur = skip_whitespace(buf, number.pos, limit);
        match peek(buf, cur, limit) {
            Some(('%', next)) => ParseOutcome::present(Value::Float(value / 100.0), next),
            _ => ParseOutcome::absent(cur),
        }
    }
}
