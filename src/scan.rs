//! Cursor helpers shared by the tokens.
//!
//! All positions are byte offsets. Nothing here ever looks at or past `limit`.

/// Character at `pos` and the position just after it, if `pos < limit`.
#[inline]
pub(crate) fn peek(buf: &str, pos: usize, limit: usize) -> Option<(char, usize)> {
    if pos >= limit {
        return None;
    }
    let b = *buf.as_bytes().get(pos)?;
    if b.is_ascii() {
        return Some((b as char, pos + 1));
    }
    let c = buf.get(pos..limit)?.chars().next()?;
    Some((c, pos + c.len_utf8()))
}

/// Field whitespace: spaces and tabs, never line terminators.
#[inline]
pub(crate) fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[inline]
pub(crate) fn is_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

pub(crate) fn skip_whitespace(buf: &str, mut pos: usize, limit: usize) -> usize {
    while let Some((c, next)) = peek(buf, pos, limit) {
        if !is_whitespace(c) {
            break;
        }
        pos = next;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_respects_limit() {
        assert_eq!(peek("abc", 1, 3), Some(('b', 2)));
        assert_eq!(peek("abc", 2, 2), None);
        assert_eq!(peek("abc", 5, 9), None);
    }

    #[test]
    fn test_peek_multibyte() {
        let buf = "aé,";
        assert_eq!(peek(buf, 1, buf.len()), Some(('é', 3)));
        // a limit that splits the character hides it
        assert_eq!(peek(buf, 1, 2), None);
    }

    #[test]
    fn test_skip_whitespace_stops_at_newline() {
        assert_eq!(skip_whitespace(" \t \nx", 0, 5), 3);
        assert_eq!(skip_whitespace("   ", 0, 2), 2);
    }
}
