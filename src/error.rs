//! Error types for the `Result`-returning entry points.
//!
//! Tokens themselves never produce an [`Error`]: a failed match is an absent
//! [`ParseOutcome`](crate::ParseOutcome) carrying the position where matching
//! gave up. Errors only appear at the boundary functions ([`parse`](crate::parse),
//! [`parse_row`](crate::parse_row), [`ParseOutcome::into_result`](crate::ParseOutcome::into_result))
//! and when options are rejected by [`LocalOpts::validate`](crate::LocalOpts::validate).
//!
//! ## Error Context
//!
//! Parse errors carry the byte offset plus a line and column computed from the
//! buffer, and the text of the offending line.
//!
//! ## Examples
//!
//! ```rust
//! use fieldtok::{parse, Token, Error};
//!
//! let result: Result<i64, Error> = parse(&Token::int(), "abc");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     assert!(err.to_string().contains("line 1"));
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents everything that can go wrong at the `Result` boundary of the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A token failed to match
    #[error("Parse error at line {line}, column {col} (offset {pos}): expected {expected}\n{context}")]
    Parse {
        line: usize,
        col: usize,
        pos: usize,
        expected: String,
        context: String,
    },

    /// Input ended before a value could be read
    #[error("Unexpected end of input at line {line}, column {col}\nExpected: {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// A parsed value could not be converted to the requested Rust type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Rejected parsing options
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error for a failed match at byte offset `pos` of `buf`.
    ///
    /// When `pos` is at (or past) the end of `buf` an [`Error::UnexpectedEof`] is
    /// produced instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldtok::Error;
    ///
    /// let err = Error::parse("1,2\n3,x", 6, "integer");
    /// assert!(err.to_string().contains("line 2, column 3"));
    /// ```
    pub fn parse(buf: &str, pos: usize, expected: &str) -> Self {
        let pos = floor_char_boundary(buf, pos);
        let (line, col) = line_col(buf, pos);
        if pos >= buf.len() {
            return Error::UnexpectedEof {
                line,
                col,
                expected: expected.to_string(),
            };
        }
        let line_start = buf[..pos].rfind('\n').map_or(0, |i| i + 1);
        let line_end = buf[pos..].find('\n').map_or(buf.len(), |i| pos + i);
        Error::Parse {
            line,
            col,
            pos,
            expected: expected.to_string(),
            context: buf[line_start..line_end].trim_end_matches('\r').to_string(),
        }
    }

    /// Creates a type mismatch error for a failed value conversion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldtok::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an invalid options error.
    pub fn invalid_options(msg: &str) -> Self {
        Error::InvalidOptions(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

fn floor_char_boundary(buf: &str, pos: usize) -> usize {
    let mut pos = pos.min(buf.len());
    while !buf.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

// 1-based line and column (in chars) of a byte offset
fn line_col(buf: &str, pos: usize) -> (usize, usize) {
    let before = &buf[..pos];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}

pub type Result<T> = std::result::Result<T, Error>;
