//! Per-call parsing policy.
//!
//! This module provides the value types that configure tokens:
//!
//! - [`LocalOpts`]: delimiter, quoting, escaping and newline handling, passed
//!   top-down through every token call
//! - [`NumberFormat`]: decimal point and thousands separator for numeric tokens
//!
//! Both are plain `Copy` values and derive `Serialize`/`Deserialize`, so they can
//! be loaded from any serde format alongside the rest of an application's configuration.
//!
//! ## Examples
//!
//! ```rust
//! use fieldtok::{LocalOpts, Token};
//!
//! // Tab separated, single quotes, backslash escapes
//! let opts = LocalOpts::new()
//!     .with_delimiter('\t')
//!     .with_quote('\'')
//!     .with_escape('\\');
//!
//! let out = Token::int().try_parse("42\t7", 0, 4, &opts);
//! assert_eq!(out.pos, 2);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parsing policy handed to every token call.
///
/// Wrappers may derive a modified copy for their children: a quoted wrapper,
/// for example, swaps the delimiter for the quote character while inside quotes.
///
/// # Examples
///
/// ```rust
/// use fieldtok::LocalOpts;
///
/// let opts = LocalOpts::default();
/// assert_eq!(opts.endchar, ',');
/// assert_eq!(opts.quotechar, '"');
/// assert_eq!(opts.escapechar, '"');
/// assert!(!opts.spacedelim);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalOpts {
    /// Character that terminates a field (the delimiter, or the quote char inside quotes).
    pub endchar: char,
    /// Fields are separated by runs of spaces/tabs instead of `endchar`.
    pub spacedelim: bool,
    pub quotechar: char,
    pub escapechar: char,
    /// Keep the surrounding quote characters in extracted strings.
    pub includequotes: bool,
    /// Let extracted strings run across line breaks.
    pub includenewlines: bool,
}

impl LocalOpts {
    /// `{delimiter=',', spacedelim=false, quote='"', escape='"', includequotes=false, includenewlines=false}`
    pub const DEFAULT: LocalOpts = LocalOpts {
        endchar: ',',
        spacedelim: false,
        quotechar: '"',
        escapechar: '"',
        includequotes: false,
        includenewlines: false,
    };

    /// Creates the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the field delimiter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldtok::LocalOpts;
    ///
    /// let opts = LocalOpts::new().with_delimiter(';');
    /// assert_eq!(opts.endchar, ';');
    /// ```
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.endchar = delimiter;
        self
    }

    /// Switches to whitespace-delimited fields.
    #[must_use]
    pub fn with_spacedelim(mut self, spacedelim: bool) -> Self {
        self.spacedelim = spacedelim;
        self
    }

    #[must_use]
    pub fn with_quote(mut self, quotechar: char) -> Self {
        self.quotechar = quotechar;
        self
    }

    #[must_use]
    pub fn with_escape(mut self, escapechar: char) -> Self {
        self.escapechar = escapechar;
        self
    }

    #[must_use]
    pub fn with_includequotes(mut self, includequotes: bool) -> Self {
        self.includequotes = includequotes;
        self
    }

    #[must_use]
    pub fn with_includenewlines(mut self, includenewlines: bool) -> Self {
        self.includenewlines = includenewlines;
        self
    }

    /// True when these options describe the inside of a quoted string.
    #[inline]
    pub fn in_quotes(&self) -> bool {
        self.endchar == self.quotechar
    }

    /// Checks that these options make sense as the ambient options of a row.
    ///
    /// Line terminators cannot be used as delimiter, quote or escape, and the
    /// delimiter must differ from the quote character. Options derived inside
    /// quotes (where delimiter and quote coincide) are not meant to be validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] describing the first problem found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldtok::LocalOpts;
    ///
    /// assert!(LocalOpts::new().validate().is_ok());
    /// assert!(LocalOpts::new().with_delimiter('"').validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        for (name, c) in [
            ("delimiter", self.endchar),
            ("quote", self.quotechar),
            ("escape", self.escapechar),
        ] {
            if c == '\n' || c == '\r' {
                return Err(Error::invalid_options(&format!(
                    "{} cannot be a line terminator",
                    name
                )));
            }
        }
        if !self.spacedelim && self.endchar == self.quotechar {
            return Err(Error::invalid_options(
                "delimiter and quote character must differ",
            ));
        }
        Ok(())
    }
}

impl Default for LocalOpts {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Decimal point and thousands separator used by numeric tokens.
///
/// # Examples
///
/// ```rust
/// use fieldtok::{NumberFormat, Token};
///
/// // German style: 1.234,5
/// let fmt = NumberFormat::new().with_decimal(',').with_thousands('.');
/// let token = Token::float_with_format(fmt);
/// let opts = fieldtok::LocalOpts::new().with_delimiter(';');
/// let out = token.try_parse("1.234,5;", 0, 8, &opts);
/// assert_eq!(out.value, Some(fieldtok::Value::Float(1234.5)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub decimal: char,
    pub thousands: Option<char>,
}

impl NumberFormat {
    pub const DEFAULT: NumberFormat = NumberFormat {
        decimal: '.',
        thousands: None,
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    #[must_use]
    pub fn with_decimal(mut self, decimal: char) -> Self {
        self.decimal = decimal;
        self
    }

    #[must_use]
    pub fn with_thousands(mut self, thousands: char) -> Self {
        self.thousands = Some(thousands);
        self
    }

    pub(crate) fn is_plain(&self) -> bool {
        self.decimal == '.' && self.thousands.is_none()
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::DEFAULT
    }
}
