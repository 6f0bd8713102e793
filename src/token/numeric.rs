//! Signed, unsigned and floating point numbers.
//!
//! Integer digits accumulate with checked arithmetic: a number that does not fit
//! the target type is rejected at the digit that overflowed.

use crate::options::NumberFormat;
use crate::outcome::ParseOutcome;
use crate::scan::peek;
use crate::value::{Value, ValueType};
use log::trace;
use std::borrow::Cow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericKind {
    /// `i64`, optional sign
    Int,
    /// `u64`, digits only
    UInt,
    /// `f64`, optional sign, fraction and exponent
    Float,
}

/// Numeric leaf token.
#[derive(Clone, Debug, PartialEq)]
pub struct Numeric {
    kind: NumericKind,
    format: NumberFormat,
}

impl Numeric {
    pub fn new(kind: NumericKind) -> Self {
        Numeric {
            kind,
            format: NumberFormat::DEFAULT,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    pub fn kind(&self) -> NumericKind {
        self.kind
    }

    pub fn format(&self) -> &NumberFormat {
        &self.format
    }

    pub(crate) fn value_type(&self) -> ValueType {
        match self.kind {
            NumericKind::Int => ValueType::Int,
            NumericKind::UInt => ValueType::UInt,
            NumericKind::Float => ValueType::Float,
        }
    }

    pub(crate) fn try_parse<'a>(
        &self,
        buf: &'a str,
        pos: usize,
        limit: usize,
    ) -> ParseOutcome<Value<'a>> {
        match self.kind {
            NumericKind::Int => parse_signed(buf, pos, limit, &self.format).map(Value::Int),
            NumericKind::UInt => parse_unsigned(buf, pos, limit, &self.format).map(Value::UInt),
            NumericKind::Float => parse_float(buf, pos, limit, &self.format).map(Value::Float),
        }
    }
}

/// Optional `+`/`-`. Returns whether the number is negative and where the digits start.
fn scan_sign(buf: &str, pos: usize, limit: usize) -> (bool, usize) {
    match peek(buf, pos, limit) {
        Some(('-', next)) => (true, next),
        Some(('+', next)) => (false, next),
        _ => (false, pos),
    }
}

#[inline]
fn is_thousands(c: char, format: &NumberFormat) -> bool {
    format.thousands == Some(c)
}

#[inline]
fn digit_at(buf: &str, pos: usize, limit: usize) -> bool {
    matches!(peek(buf, pos, limit), Some((c, _)) if c.is_ascii_digit())
}

/// Base-10 digits. A thousands separator is skipped only between two digits.
pub(crate) fn parse_unsigned(
    buf: &str,
    pos: usize,
    limit: usize,
    format: &NumberFormat,
) -> ParseOutcome<u64> {
    let mut value: u64 = 0;
    let mut digits = 0usize;
    let mut cur = pos;
    while let Some((c, next)) = peek(buf, cur, limit) {
        if let Some(d) = c.to_digit(10) {
            value = match value.checked_mul(10).and_then(|v| v.checked_add(u64::from(d))) {
                Some(v) => v,
                None => {
                    trace!("integer overflow at offset {}", cur);
                    return ParseOutcome::absent(cur);
                }
            };
            digits += 1;
            cur = next;
        } else if digits > 0 && is_thousands(c, format) && digit_at(buf, next, limit) {
            cur = next;
        } else {
            break;
        }
    }
    if digits == 0 {
        ParseOutcome::absent(cur)
    } else {
        ParseOutcome::present(value, cur)
    }
}

pub(crate) fn parse_signed(
    buf: &str,
    pos: usize,
    limit: usize,
    format: &NumberFormat,
) -> ParseOutcome<i64> {
    let (negative, start) = scan_sign(buf, pos, limit);
    let magnitude = parse_unsigned(buf, start, limit, format);
    let end = magnitude.pos;
    let Some(magnitude) = magnitude.value else {
        return ParseOutcome::absent(end);
    };
    let value = if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    };
    match value {
        Some(v) => ParseOutcome::present(v, end),
        None => {
            // the run always ends on an ASCII digit
            let last_digit = end - 1;
            trace!("integer out of range at offset {}", last_digit);
            ParseOutcome::absent(last_digit)
        }
    }
}

/// Counts a run of digits without accumulating; returns (count, end, saw_separator).
fn scan_digit_run(
    buf: &str,
    pos: usize,
    limit: usize,
    format: &NumberFormat,
) -> (usize, usize, bool) {
    let mut digits = 0usize;
    let mut separated = false;
    let mut cur = pos;
    while let Some((c, next)) = peek(buf, cur, limit) {
        if c.is_ascii_digit() {
            digits += 1;
            cur = next;
        } else if digits > 0 && is_thousands(c, format) && digit_at(buf, next, limit) {
            separated = true;
            cur = next;
        } else {
            break;
        }
    }
    (digits, cur, separated)
}

/// `[sign] int [decimal frac] [(e|E) signed-int]`, or `[sign] decimal frac [...]`.
///
/// Each optional stage that does not match leaves the cursor where it was. The
/// matched span is then converted with the standard correctly rounded decimal
/// conversion, after normalising separators.
pub(crate) fn parse_float(
    buf: &str,
    pos: usize,
    limit: usize,
    format: &NumberFormat,
) -> ParseOutcome<f64> {
    let (_, mut cur) = scan_sign(buf, pos, limit);
    let mut digits = 0usize;
    let mut separated = false;

    if !matches!(peek(buf, cur, limit), Some((c, _)) if c == format.decimal) {
        let (n, end, sep) = scan_digit_run(buf, cur, limit, format);
        if n == 0 {
            return ParseOutcome::absent(end);
        }
        digits += n;
        separated = sep;
        cur = end;
    }

    if let Some((c, after_point)) = peek(buf, cur, limit) {
        if c == format.decimal {
            let mut frac = 0usize;
            let mut end = after_point;
            while let Some((d, next)) = peek(buf, end, limit) {
                if !d.is_ascii_digit() {
                    break;
                }
                frac += 1;
                end = next;
            }
            if frac > 0 {
                digits += frac;
                cur = end;
            }
        }
    }

    if digits == 0 {
        return ParseOutcome::absent(cur);
    }

    if let Some(('e' | 'E', after_e)) = peek(buf, cur, limit) {
        let exponent = parse_signed(buf, after_e, limit, &NumberFormat::DEFAULT);
        if exponent.is_present() {
            cur = exponent.pos;
        }
    }

    let span = &buf[pos..cur];
    let text: Cow<'_, str> = if format.is_plain() || (!separated && format.decimal == '.') {
        Cow::Borrowed(span)
    } else {
        Cow::Owned(
            span.chars()
                .filter(|c| !is_thousands(*c, format))
                .map(|c| if c == format.decimal { '.' } else { c })
                .collect(),
        )
    };
    match text.parse::<f64>() {
        Ok(v) => ParseOutcome::present(v, cur),
        Err(_) => ParseOutcome::absent(pos),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(s: &str) -> ParseOutcome<i64> {
        parse_signed(s, 0, s.len(), &NumberFormat::DEFAULT)
    }

    fn float(s: &str) -> ParseOutcome<f64> {
        parse_float(s, 0, s.len(), &NumberFormat::DEFAULT)
    }

    #[test]
    fn test_signed_integers() {
        assert_eq!(int("42"), ParseOutcome::present(42, 2));
        assert_eq!(int("-17,"), ParseOutcome::present(-17, 3));
        assert_eq!(int("+5"), ParseOutcome::present(5, 2));
        assert_eq!(int("007x"), ParseOutcome::present(7, 3));
    }

    #[test]
    fn test_signed_failure_positions() {
        assert_eq!(int(""), ParseOutcome::absent(0));
        assert_eq!(int("x"), ParseOutcome::absent(0));
        assert_eq!(int("-"), ParseOutcome::absent(1));
        assert_eq!(int("- 1"), ParseOutcome::absent(1));
    }

    #[test]
    fn test_integer_extremes() {
        assert_eq!(int("9223372036854775807").value, Some(i64::MAX));
        assert_eq!(int("-9223372036854775808").value, Some(i64::MIN));
        assert_eq!(int("9223372036854775808"), ParseOutcome::absent(18));
        assert_eq!(int("-9223372036854775809"), ParseOutcome::absent(19));
    }

    #[test]
    fn test_unsigned_overflow_rejected_at_digit() {
        let s = "18446744073709551616";
        let out = parse_unsigned(s, 0, s.len(), &NumberFormat::DEFAULT);
        assert_eq!(out, ParseOutcome::absent(19));

        let s = "18446744073709551615";
        let out = parse_unsigned(s, 0, s.len(), &NumberFormat::DEFAULT);
        assert_eq!(out.value, Some(u64::MAX));
    }

    #[test]
    fn test_unsigned_takes_no_sign() {
        let out = Numeric::new(NumericKind::UInt).try_parse("-3", 0, 2);
        assert_eq!(out, ParseOutcome::absent(0));
    }

    #[test]
    fn test_float_stages() {
        assert_eq!(float("3.25"), ParseOutcome::present(3.25, 4));
        assert_eq!(float(".5"), ParseOutcome::present(0.5, 2));
        assert_eq!(float("-.5"), ParseOutcome::present(-0.5, 3));
        assert_eq!(float("12"), ParseOutcome::present(12.0, 2));
        assert_eq!(float("1.5e3"), ParseOutcome::present(1500.0, 5));
        assert_eq!(float("2E-2,"), ParseOutcome::present(0.02, 4));
    }

    #[test]
    fn test_float_optional_stages_fall_through() {
        // trailing point without digits stays unconsumed
        assert_eq!(float("5."), ParseOutcome::present(5.0, 1));
        // dangling exponent marker stays unconsumed
        assert_eq!(float("7e"), ParseOutcome::present(7.0, 1));
        assert_eq!(float("7e+"), ParseOutcome::present(7.0, 1));
        assert_eq!(float("7ex"), ParseOutcome::present(7.0, 1));
    }

    #[test]
    fn test_float_without_digits_fails() {
        assert!(!float("").is_present());
        assert!(!float(".").is_present());
        assert!(!float("-").is_present());
        assert!(!float("e5").is_present());
        assert!(!float("-.e1").is_present());
    }

    #[test]
    fn test_thousands_separator() {
        let fmt = NumberFormat::new().with_thousands(',');
        let s = "1,234,567";
        assert_eq!(
            parse_signed(s, 0, s.len(), &fmt),
            ParseOutcome::present(1_234_567, 9)
        );
        // a separator not followed by a digit ends the number
        let s = "12,x";
        assert_eq!(parse_signed(s, 0, s.len(), &fmt), ParseOutcome::present(12, 2));

        let s = "-1,000.25";
        assert_eq!(parse_float(s, 0, s.len(), &fmt), ParseOutcome::present(-1000.25, 9));
    }

    #[test]
    fn test_decimal_comma() {
        let fmt = NumberFormat::new().with_decimal(',');
        let s = "3,75;";
        assert_eq!(parse_float(s, 0, s.len(), &fmt), ParseOutcome::present(3.75, 4));
        let s = ",5";
        assert_eq!(parse_float(s, 0, s.len(), &fmt), ParseOutcome::present(0.5, 2));
    }

    #[test]
    fn test_limit_bounds_scan() {
        let s = "12345";
        assert_eq!(
            parse_signed(s, 0, 3, &NumberFormat::DEFAULT),
            ParseOutcome::present(123, 3)
        );
        assert_eq!(
            parse_float("1.25", 0, 2, &NumberFormat::DEFAULT),
            ParseOutcome::present(1.0, 1)
        );
    }
}
