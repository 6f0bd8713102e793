//! Dates and times parsed with `chrono` format strings.

use crate::options::LocalOpts;
use crate::outcome::ParseOutcome;
use crate::scan::{is_newline, is_whitespace, peek};
use crate::value::{Value, ValueType};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemporalKind {
    Date,
    Time,
    DateTime,
}

/// Dates and times described by a `chrono` format string.
///
/// The text handed to the format engine ends at the first field terminator
/// (the end char, or a space/tab when space delimited, or a line break); the
/// format does not have to consume all of it.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use fieldtok::{Token, Value};
///
/// let token = Token::date("%d/%m/%Y");
/// let out = token.try_parse_default("24/12/2023,x", 0, 12);
/// assert_eq!(out.value, Some(Value::Date(NaiveDate::from_ymd_opt(2023, 12, 24).unwrap())));
/// assert_eq!(out.pos, 10);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DateTimeToken {
    kind: TemporalKind,
    format: String,
}

impl DateTimeToken {
    pub fn new(kind: TemporalKind, format: &str) -> Self {
        DateTimeToken {
            kind,
            format: format.to_string(),
        }
    }

    pub fn kind(&self) -> TemporalKind {
        self.kind
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub(crate) fn value_type(&self) -> ValueType {
        match self.kind {
            TemporalKind::Date => ValueType::Date,
            TemporalKind::Time => ValueType::Time,
            TemporalKind::DateTime => ValueType::DateTime,
        }
    }

    pub(crate) fn try_parse<'a>(
        &self,
        buf: &'a str,
        pos: usize,
        limit: usize,
        opts: &LocalOpts,
    ) -> ParseOutcome<Value<'a>> {
        let end = terminator(buf, pos, limit, opts);
        let Some(text) = buf.get(pos..end) else {
            return ParseOutcome::absent(pos);
        };
        let parsed = match self.kind {
            TemporalKind::Date => NaiveDate::parse_and_remainder(text, &self.format)
                .map(|(d, rest)| (Value::Date(d), rest.len())),
            TemporalKind::Time => NaiveTime::parse_and_remainder(text, &self.format)
                .map(|(t, rest)| (Value::Time(t), rest.len())),
            TemporalKind::DateTime => NaiveDateTime::parse_and_remainder(text, &self.format)
                .map(|(dt, rest)| (Value::DateTime(dt), rest.len())),
        };
        match parsed {
            Ok((value, remaining)) => ParseOutcome::present(value, end - remaining),
            Err(_) => ParseOutcome::absent(pos),
        }
    }
}

fn terminator(buf: &str, mut pos: usize, limit: usize, opts: &LocalOpts) -> usize {
    while let Some((c, next)) = peek(buf, pos, limit) {
        let stop = if opts.spacedelim {
            is_whitespace(c)
        } else {
            c == opts.endchar
        };
        if stop || is_newline(c) {
            break;
        }
        pos = next;
    }
    pos
}
