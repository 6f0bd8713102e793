//! Optional or required quoting around an inner token.

use super::Token;
use crate::options::LocalOpts;
use crate::outcome::ParseOutcome;
use crate::scan::{peek, skip_whitespace};
use crate::value::Value;
use log::trace;

/// Strips (or requires) quotes around an inner token.
///
/// When the field starts with the active quote char the inner token runs with
/// options describing the inside of the quotes: the quote char becomes the end
/// char and space delimiting is off. Unless quotes are included in the value,
/// the closing quote must follow the inner value.
///
/// # Examples
///
/// ```rust
/// use fieldtok::{Quoted, StrTarget, Token, Value};
///
/// let token = Token::quoted(Token::string(StrTarget::Owned));
/// let out = token.try_parse_default("\"a,b\",c", 0, 7);
/// assert_eq!(out.value, Some(Value::String("a,b".to_string())));
/// assert_eq!(out.pos, 5);
///
/// let strict = Token::Quoted(Quoted::new(Token::int()).required(true));
/// assert!(!strict.try_parse_default("12", 0, 2).is_present());
/// ```
#[derive(Clone, Debug)]
pub struct Quoted {
    inner: Box<Token>,
    required: bool,
    stripspaces: bool,
    includequotes: bool,
    includenewlines: bool,
    quotechar: Option<char>,
    escapechar: Option<char>,
}

impl Quoted {
    /// Optional quotes; whitespace inside the quotes is stripped for numeric
    /// inner tokens; newlines allowed inside quotes; quote and escape chars
    /// inherited from the ambient options.
    pub fn new(inner: Token) -> Self {
        let stripspaces = inner.value_type().is_numeric();
        Quoted {
            inner: Box::new(inner),
            required: false,
            stripspaces,
            includequotes: false,
            includenewlines: true,
            quotechar: None,
            escapechar: None,
        }
    }

    pub fn inner(&self) -> &Token {
        &self.inner
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn stripspaces(mut self, stripspaces: bool) -> Self {
        self.stripspaces = stripspaces;
        self
    }

    #[must_use]
    pub fn includequotes(mut self, includequotes: bool) -> Self {
        self.includequotes = includequotes;
        self
    }

    #[must_use]
    pub fn includenewlines(mut self, includenewlines: bool) -> Self {
        self.includenewlines = includenewlines;
        self
    }

    #[must_use]
    pub fn with_quote(mut self, quotechar: char) -> Self {
        self.quotechar = Some(quotechar);
        self
    }

    #[must_use]
    pub fn with_escape(mut self, escapechar: char) -> Self {
        self.escapechar = Some(escapechar);
        self
    }

    pub(crate) fn try_parse<'a>(
        &self,
        buf: &'a str,
        pos: usize,
        limit: usize,
        opts: &LocalOpts,
    ) -> ParseOutcome<Value<'a>> {
        let Some((c, after_quote)) = peek(buf, pos, limit) else {
            if self.required {
                return ParseOutcome::absent(pos);
            }
            return self.inner.try_parse(buf, pos, limit, opts);
        };

        let quotechar = self.quotechar.unwrap_or(opts.quotechar);
        let escapechar = self.escapechar.unwrap_or(opts.escapechar);
        let quoted = c == quotechar;

        let inner = if quoted {
            let mut cur = if self.includequotes { pos } else { after_quote };
            if self.stripspaces {
                cur = skip_whitespace(buf, cur, limit);
            }
            let inside = LocalOpts {
                endchar: quotechar,
                spacedelim: false,
                quotechar,
                escapechar,
                includequotes: self.includequotes,
                includenewlines: self.includenewlines,
            };
            self.inner.try_parse(buf, cur, limit, &inside)
        } else if self.required {
            return ParseOutcome::absent(pos);
        } else {
            self.inner.try_parse(buf, pos, limit, opts)
        };

        let Some(value) = inner.value else {
            return ParseOutcome::absent(inner.pos);
        };
        let mut cur = inner.pos;

        if cur >= limit {
            if quoted && !self.includequotes {
                trace!("unterminated quote opened at offset {}", pos);
                return ParseOutcome::absent(cur);
            }
            return ParseOutcome::present(value, cur);
        }

        if self.stripspaces {
            cur = skip_whitespace(buf, cur, limit);
        }

        if quoted && !self.includequotes {
            match peek(buf, cur, limit) {
                Some((c, next)) if c == quotechar => cur = next,
                _ => {
                    trace!("expected closing quote at offset {}", cur);
                    return ParseOutcome::absent(cur);
                }
            }
        }

        ParseOutcome::present(value, cur)
    }
}
