//! Per-column driver: whitespace trimming and field terminators.

use super::Token;
use crate::options::LocalOpts;
use crate::outcome::ParseOutcome;
use crate::scan::{is_whitespace, peek, skip_whitespace};
use crate::value::Value;

/// Top-level per-column driver.
///
/// Trims whitespace around the inner token and consumes the field terminator:
/// the end char, a space/tab run when space delimited, or (with `eoldelim`) a
/// line break. `\r\n` and `\n\r` are consumed as one terminator.
///
/// # Examples
///
/// ```rust
/// use fieldtok::{Field, Token, Value};
///
/// let last = Token::Field(Field::new(Token::int()).eoldelim(true));
/// let out = last.try_parse_default("x,42\r\n7", 2, 8);
/// assert_eq!(out.value, Some(Value::Int(42)));
/// assert_eq!(out.pos, 6);
/// ```
#[derive(Clone, Debug)]
pub struct Field {
    inner: Box<Token>,
    ignore_init_whitespace: bool,
    ignore_end_whitespace: bool,
    eoldelim: bool,
}

impl Field {
    pub fn new(inner: Token) -> Self {
        Field {
            inner: Box::new(inner),
            ignore_init_whitespace: true,
            ignore_end_whitespace: true,
            eoldelim: false,
        }
    }

    pub fn inner(&self) -> &Token {
        &self.inner
    }

    #[must_use]
    pub fn ignore_init_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_init_whitespace = ignore;
        self
    }

    #[must_use]
    pub fn ignore_end_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_end_whitespace = ignore;
        self
    }

    /// Accept a line break (or the end of input) as the terminator.
    #[must_use]
    pub fn eoldelim(mut self, eoldelim: bool) -> Self {
        self.eoldelim = eoldelim;
        self
    }

    pub(crate) fn try_parse<'a>(
        &self,
        buf: &'a str,
        pos: usize,
        limit: usize,
        opts: &LocalOpts,
    ) -> ParseOutcome<Value<'a>> {
        let mut cur = pos;
        if self.ignore_init_whitespace {
            cur = skip_whitespace(buf, cur, limit);
        }

        let inner = self.inner.try_parse(buf, cur, limit, opts);
        let Some(value) = inner.value else {
            return ParseOutcome::absent(inner.pos);
        };
        // columns of unknown type always yield the shared null
        let value = if self.inner.is_missing() {
            Value::Null
        } else {
            value
        };
        cur = inner.pos;

        if self.ignore_end_whitespace {
            let start = cur;
            while let Some((c, next)) = peek(buf, cur, limit) {
                if !opts.spacedelim && opts.endchar == '\t' && c == '\t' {
                    return ParseOutcome::present(value, next);
                }
                if !is_whitespace(c) {
                    break;
                }
                cur = next;
            }
            if opts.spacedelim && cur > start {
                return ParseOutcome::present(value, cur);
            }
        }

        let Some((c, next)) = peek(buf, cur, limit) else {
            return if self.eoldelim {
                ParseOutcome::present(value, cur)
            } else {
                ParseOutcome::absent(cur)
            };
        };

        if opts.spacedelim && is_whitespace(c) {
            return ParseOutcome::present(value, next);
        }
        if !opts.spacedelim && c == opts.endchar {
            return ParseOutcome::present(value, next);
        }
        if self.eoldelim && (c == '\r' || c == '\n') {
            let pair = if c == '\r' { '\n' } else { '\r' };
            let end = match peek(buf, next, limit) {
                Some((n, after)) if n == pair => after,
                _ => next,
            };
            return ParseOutcome::present(value, end);
        }

        ParseOutcome::absent(cur)
    }
}
