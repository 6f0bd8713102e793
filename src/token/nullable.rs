//! Missing-value recognition: empty fields and null sentinels such as `NA`.

use super::string::scan;
use super::Token;
use crate::options::LocalOpts;
use crate::outcome::ParseOutcome;
use crate::scan::{is_newline, is_whitespace, peek, skip_whitespace};
use crate::value::Value;
use log::trace;
use once_cell::sync::Lazy;
use std::sync::Arc;

const BASE_SENTINELS: [&str; 14] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "N/A",
    "NA", "NULL", "NaN", "nan",
];

static DEFAULT_SENTINELS: Lazy<NullSentinels> = Lazy::new(|| {
    NullSentinels::new(BASE_SENTINELS.iter().flat_map(|s| {
        [s.to_string(), s.to_lowercase(), s.to_uppercase()]
    }))
});

/// Sorted set of strings that stand for a missing value.
///
/// Containment is case-sensitive; the default table already lists the common
/// letter-case variants. Cloning is cheap.
///
/// # Examples
///
/// ```rust
/// use fieldtok::NullSentinels;
///
/// let table = NullSentinels::default();
/// assert!(table.contains("NA"));
/// assert!(table.contains("null"));
/// assert!(!table.contains("none"));
///
/// let custom = NullSentinels::new(["-", "?"]);
/// assert!(custom.contains("?"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullSentinels {
    sorted: Arc<[String]>,
}

impl NullSentinels {
    pub fn new<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sorted: Vec<String> = strings.into_iter().map(Into::into).collect();
        sorted.sort();
        sorted.dedup();
        NullSentinels {
            sorted: sorted.into(),
        }
    }

    pub fn contains(&self, s: &str) -> bool {
        self.sorted
            .binary_search_by(|probe| probe.as_str().cmp(s))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sorted.iter().map(String::as_str)
    }
}

impl Default for NullSentinels {
    fn default() -> Self {
        DEFAULT_SENTINELS.clone()
    }
}

/// Recognises missing values around an inner token.
///
/// Leading whitespace is skipped. An empty field is null when `emptyisna` is
/// set. Otherwise the inner token runs; if it fails, the raw text up to the
/// delimiter or line end is looked up in the sentinel table. A null result is
/// [`Value::Null`], which is distinct from a failed parse.
///
/// # Examples
///
/// ```rust
/// use fieldtok::{Token, Value};
///
/// let token = Token::nullable(Token::int());
/// assert_eq!(token.try_parse_default("7", 0, 1).value, Some(Value::Int(7)));
/// assert_eq!(token.try_parse_default("NULL", 0, 4).value, Some(Value::Null));
/// assert_eq!(token.try_parse_default("", 0, 0).value, Some(Value::Null));
/// assert_eq!(token.try_parse_default("seven", 0, 5).value, None);
/// ```
#[derive(Clone, Debug)]
pub struct Nullable {
    inner: Box<Token>,
    emptyisna: bool,
    sentinels: NullSentinels,
}

impl Nullable {
    pub fn new(inner: Token) -> Self {
        Nullable {
            inner: Box::new(inner),
            emptyisna: true,
            sentinels: NullSentinels::default(),
        }
    }

    pub fn inner(&self) -> &Token {
        &self.inner
    }

    pub fn sentinels(&self) -> &NullSentinels {
        &self.sentinels
    }

    #[must_use]
    pub fn emptyisna(mut self, emptyisna: bool) -> Self {
        self.emptyisna = emptyisna;
        self
    }

    #[must_use]
    pub fn with_sentinels(mut self, sentinels: NullSentinels) -> Self {
        self.sentinels = sentinels;
        self
    }

    pub(crate) fn try_parse<'a>(
        &self,
        buf: &'a str,
        pos: usize,
        limit: usize,
        opts: &LocalOpts,
    ) -> ParseOutcome<Value<'a>> {
        let cur = skip_whitespace(buf, pos, limit);
        let Some((c, _)) = peek(buf, cur, limit) else {
            return if self.emptyisna {
                ParseOutcome::present(Value::Null, cur)
            } else {
                ParseOutcome::absent(cur)
            };
        };

        if self.emptyisna && (c == opts.endchar || is_newline(c)) {
            return ParseOutcome::present(Value::Null, cur);
        }

        if !matches!(*self.inner, Token::Unknown) {
            let inner = self.inner.try_parse(buf, cur, limit, opts);
            if inner.is_present() {
                return inner;
            }
        }

        let naopts = LocalOpts {
            includequotes: false,
            ..*opts
        };
        let raw = scan(buf, cur, limit, &naopts);
        let text = buf[raw.start..raw.end].trim_end_matches(is_whitespace);
        if self.sentinels.contains(text) {
            trace!("null sentinel {:?} at offset {}", text, cur);
            return ParseOutcome::present(Value::Null, skip_whitespace(buf, raw.end, limit));
        }
        ParseOutcome::absent(cur)
    }
}
