//! Value scanner: finds the extent of the next value without validating it.
//!
//! The scanner trusts its input to be grammatical (the reader validates
//! first). It only tracks enough structure to find where a value ends:
//!
//! - Containers are skipped by counting `{`/`[` against `}`/`]`, toggling on
//!   unescaped `"` so that brackets inside strings are ignored.
//! - Strings end at the next unescaped `"`.
//! - Numbers take the maximal run of number bytes.
//! - Keywords take exactly four or five bytes.
//!
//! After the value, whitespace is skipped and a terminator (`,`, `]`, `}`) or
//! end of input must follow.

use crate::{
    Kind,
    lexical::{is_digit, is_terminator, ltrim, match_keyword},
    validate::number_kind,
};

/// The outcome of [`scan`].
///
/// On failure `kind` is [`Kind::Invalid`] and `start`, `end`, and `next` all
/// point at the offending byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned {
    pub kind: Kind,
    /// First byte of the value.
    pub start: usize,
    /// One past the last byte of the value.
    pub end: usize,
    /// One past the terminator, or the input length when the value ran to the
    /// end.
    pub next: usize,
    /// The terminator that followed the value, if any.
    pub terminator: Option<u8>,
}

impl Scanned {
    fn invalid(at: usize) -> Self {
        Self {
            kind: Kind::Invalid,
            start: at,
            end: at,
            next: at,
            terminator: None,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.kind != Kind::Invalid
    }
}

/// Locates the value that starts at the first non-whitespace byte at or after
/// `start`.
///
/// ```rust
/// use jsonpeek::{Kind, scan};
///
/// let buf = br#"[ "a,b" , 12 ]"#;
/// let first = scan(buf, 1);
/// assert_eq!(first.kind, Kind::String);
/// assert_eq!(&buf[first.start..first.end], br#""a,b""#);
/// assert_eq!(first.terminator, Some(b','));
///
/// let second = scan(buf, first.next);
/// assert_eq!(second.kind, Kind::Int);
/// assert_eq!(second.terminator, Some(b']'));
/// ```
#[must_use]
pub fn scan(buf: &[u8], start: usize) -> Scanned {
    let i = ltrim(buf, start);
    let Some(&first) = buf.get(i) else {
        return Scanned::invalid(i);
    };
    let (kind, end) = match first {
        b'{' => (Kind::Object, container_end(buf, i)),
        b'[' => (Kind::Array, container_end(buf, i)),
        b'"' => (Kind::String, string_end(buf, i)),
        b'-' | b'0'..=b'9' => (number_kind(&buf[i..]), Some(number_end(buf, i))),
        b't' | b'T' => (Kind::Bool, keyword_end(buf, i, b"true")),
        b'f' | b'F' => (Kind::Bool, keyword_end(buf, i, b"false")),
        b'n' | b'N' => (Kind::Null, keyword_end(buf, i, b"null")),
        _ => return Scanned::invalid(i),
    };
    let Some(end) = end else {
        return Scanned::invalid(i);
    };

    let after = ltrim(buf, end);
    let (next, terminator) = match buf.get(after) {
        None => (buf.len(), None),
        Some(&b) if is_terminator(b) => (after + 1, Some(b)),
        Some(_) => return Scanned::invalid(after),
    };
    Scanned {
        kind,
        start: i,
        end,
        next,
        terminator,
    }
}

/// One past the closing quote of the string opening at `start`.
pub(crate) fn string_end(buf: &[u8], start: usize) -> Option<usize> {
    let mut j = start + 1;
    while j < buf.len() {
        match buf[j] {
            b'\\' => j += 2,
            b'"' => return Some(j + 1),
            _ => j += 1,
        }
    }
    None
}

fn container_end(buf: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut j = start;
    while j < buf.len() {
        let b = buf[j];
        if in_string {
            match b {
                b'\\' => j += 1,
                b'"' => in_string = false,
                _ => {}
            }
        } else {
            match b {
                b'"' => in_string = true,
                b'{' | b'[' => depth += 1,
                b'}' | b']' => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(j + 1);
                    }
                }
                _ => {}
            }
        }
        j += 1;
    }
    None
}

/// A leading `-`, then digits with at most one `.`, at most one exponent
/// marker, and a sign only directly after the marker.
fn number_end(buf: &[u8], start: usize) -> usize {
    let mut j = start;
    if buf.get(j) == Some(&b'-') {
        j += 1;
    }
    let mut seen_dot = false;
    let mut seen_exp = false;
    while let Some(&b) = buf.get(j) {
        match b {
            _ if is_digit(b) => {}
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if !seen_exp => seen_exp = true,
            b'+' | b'-' if seen_exp && matches!(buf[j - 1], b'e' | b'E') => {}
            _ => break,
        }
        j += 1;
    }
    j
}

fn keyword_end(buf: &[u8], start: usize, keyword: &[u8]) -> Option<usize> {
    match_keyword(&buf[start..], keyword).then_some(start + keyword.len())
}
