//! Quote, escape and newline aware string extraction.

use crate::options::LocalOpts;
use crate::outcome::ParseOutcome;
use crate::scan::{is_newline, is_whitespace, peek};
use crate::value::{StrView, Value, ValueType};

/// How an extracted string is materialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrTarget {
    /// Copy into a `String`, collapsing escaped quotes.
    #[default]
    Owned,
    /// `(offset, length)` into the parsed buffer.
    View,
    /// A `&str` borrowed from the parsed buffer.
    Slice,
}

/// String leaf token. Always succeeds; an empty span is an empty string.
///
/// Scanning stops:
///
/// - before a space or tab when `spacedelim` is set,
/// - otherwise at `endchar`, unless the quote/escape rules say it is literal,
/// - before a line terminator unless `includenewlines` is set.
///
/// Inside quotes (`endchar == quotechar`) a doubled quote is a literal quote
/// when the escape char is the quote char; otherwise a quote preceded by the
/// escape char is literal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StringToken {
    target: StrTarget,
}

/// Result of a scan: the extracted span, where the cursor ends up and how many
/// escaped quotes were passed over.
#[derive(Debug, PartialEq)]
pub(crate) struct Scan {
    pub start: usize,
    pub end: usize,
    pub escapes: usize,
}

impl StringToken {
    pub fn new(target: StrTarget) -> Self {
        StringToken { target }
    }

    pub fn target(&self) -> StrTarget {
        self.target
    }

    pub(crate) fn value_type(&self) -> ValueType {
        match self.target {
            StrTarget::Owned => ValueType::String,
            StrTarget::View => ValueType::StrView,
            StrTarget::Slice => ValueType::Str,
        }
    }

    pub(crate) fn try_parse<'a>(
        &self,
        buf: &'a str,
        pos: usize,
        limit: usize,
        opts: &LocalOpts,
    ) -> ParseOutcome<Value<'a>> {
        let scan = scan(buf, pos, limit, opts);
        let raw = &buf[scan.start..scan.end];
        let value = match self.target {
            StrTarget::Owned if scan.escapes > 0 && !opts.includequotes => {
                Value::String(unescape(raw, opts.quotechar, opts.escapechar))
            }
            StrTarget::Owned => Value::String(raw.to_string()),
            StrTarget::View => Value::View(StrView::new(scan.start, raw.len())),
            StrTarget::Slice => Value::Str(raw),
        };
        ParseOutcome::present(value, scan.end)
    }
}

pub(crate) fn scan(buf: &str, pos: usize, limit: usize, opts: &LocalOpts) -> Scan {
    let quoted = opts.in_quotes();
    let self_escaping = opts.escapechar == opts.quotechar;
    let mut cur = pos;
    let mut escapes = 0usize;
    // the char just before `cur` is the escape char
    let mut after_escape = false;

    if opts.includequotes {
        if let Some((c, next)) = peek(buf, cur, limit) {
            if c == opts.quotechar {
                cur = next;
            }
        }
    }

    while let Some((c, next)) = peek(buf, cur, limit) {
        if opts.spacedelim && is_whitespace(c) {
            break;
        } else if !opts.spacedelim && c == opts.endchar {
            if quoted {
                if self_escaping {
                    if let Some((n, after)) = peek(buf, next, limit) {
                        if n == opts.quotechar {
                            escapes += 1;
                            cur = after;
                            continue;
                        }
                    }
                } else if after_escape {
                    escapes += 1;
                    after_escape = false;
                    cur = next;
                    continue;
                }
            }
            if opts.includequotes {
                cur = next;
            }
            break;
        } else if !opts.includenewlines && is_newline(c) {
            break;
        }
        after_escape = quoted && !self_escaping && c == opts.escapechar;
        cur = next;
    }

    Scan {
        start: pos,
        end: cur,
        escapes,
    }
}

/// Drops the escape char in front of a quote.
fn unescape(raw: &str, quotechar: char, escapechar: char) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == escapechar {
            if let Some(&n) = chars.peek() {
                if n == quotechar {
                    out.push(n);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
