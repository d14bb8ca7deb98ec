//! Byte-level predicates shared by the validator, the scanner, and the
//! coercion layer.
//!
//! Keyword matching is ASCII case-insensitive: `NULL`, `True`, and `fALSE`
//! are all accepted wherever `null`, `true`, and `false` are.

/// Space, tab, line feed, carriage return, or form feed.
#[inline]
#[must_use]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

/// `,`, `]`, or `}`.
#[inline]
#[must_use]
pub fn is_terminator(b: u8) -> bool {
    matches!(b, b',' | b']' | b'}')
}

#[inline]
#[must_use]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
#[must_use]
pub fn is_hex(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// Bytes that may appear in the maximal run of a number token.
#[inline]
pub(crate) fn is_number_byte(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-')
}

/// Returns `true` when `buf` starts with `keyword`, ignoring ASCII case.
#[must_use]
pub fn match_keyword(buf: &[u8], keyword: &[u8]) -> bool {
    buf.len() >= keyword.len() && buf[..keyword.len()].eq_ignore_ascii_case(keyword)
}

/// Returns `true` when the whole of `buf` is `keyword`, ignoring ASCII case.
#[must_use]
pub fn eq_keyword(buf: &[u8], keyword: &[u8]) -> bool {
    buf.eq_ignore_ascii_case(keyword)
}

/// Returns the first offset at or after `start` that is not whitespace, or
/// `buf.len()` when there is none.
#[must_use]
pub fn ltrim(buf: &[u8], start: usize) -> usize {
    let mut i = start.min(buf.len());
    while i < buf.len() && is_whitespace(buf[i]) {
        i += 1;
    }
    i
}

/// Returns `buf` without leading and trailing whitespace.
#[must_use]
pub fn trim(buf: &[u8]) -> &[u8] {
    let start = ltrim(buf, 0);
    let mut end = buf.len();
    while end > start && is_whitespace(buf[end - 1]) {
        end -= 1;
    }
    &buf[start..end]
}

/// Strips one pair of surrounding double quotes, if present.
pub(crate) fn unquote(buf: &[u8]) -> &[u8] {
    match buf {
        [b'"', inner @ .., b'"'] => inner,
        _ => buf,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b' ', true)]
    #[case(b'\t', true)]
    #[case(b'\n', true)]
    #[case(b'\r', true)]
    #[case(0x0C, true)]
    #[case(0x0B, false)]
    #[case(b'a', false)]
    fn whitespace_set(#[case] b: u8, #[case] expected: bool) {
        assert_eq!(is_whitespace(b), expected);
    }

    #[test]
    fn terminators() {
        assert!(is_terminator(b','));
        assert!(is_terminator(b']'));
        assert!(is_terminator(b'}'));
        assert!(!is_terminator(b':'));
        assert!(!is_terminator(b'['));
    }

    #[rstest]
    #[case(b"null", b"null", true)]
    #[case(b"NULL", b"null", true)]
    #[case(b"nUlL,", b"null", true)]
    #[case(b"nul", b"null", false)]
    #[case(b"TRUE", b"true", true)]
    #[case(b"FaLsE", b"false", true)]
    #[case(b"fals", b"false", false)]
    fn keywords_ignore_case(#[case] buf: &[u8], #[case] kw: &[u8], #[case] expected: bool) {
        assert_eq!(match_keyword(buf, kw), expected);
    }

    #[test]
    fn eq_keyword_requires_exact_length() {
        assert!(eq_keyword(b"True", b"true"));
        assert!(!eq_keyword(b"truey", b"true"));
    }

    #[test]
    fn trimming() {
        assert_eq!(trim(b" \t{} \r\n"), b"{}");
        assert_eq!(trim(b"   "), b"");
        assert_eq!(trim(b"a b"), b"a b");
        assert_eq!(ltrim(b"  x", 0), 2);
        assert_eq!(ltrim(b"x  ", 1), 3);
        assert_eq!(ltrim(b"x", 5), 1);
    }

    #[test]
    fn unquote_only_strips_a_matching_pair() {
        assert_eq!(unquote(br#""abc""#), b"abc");
        assert_eq!(unquote(br#""""#), b"");
        assert_eq!(unquote(br#"""#), br#"""#);
        assert_eq!(unquote(b"123"), b"123");
    }
}
