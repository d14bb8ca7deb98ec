//! Grammar validator and the validation surface.
//!
//! The validator is a recursive-descent recognizer over raw bytes. It never
//! allocates and never builds anything; it only answers whether the input
//! conforms to the (lenient) JSON grammar:
//!
//! - `null`, `true`, and `false` match regardless of ASCII case.
//! - `\b`, `\f`, `\n`, `\r`, and `\t` escapes are also accepted in upper case.
//! - Surrogate pairs are not checked here; decoding handles them.
//!
//! Everything else follows RFC 8259: no trailing commas, no comments, no
//! leading zeros, at least one digit after `.` and after an exponent marker.

use crate::{
    Error, Kind, ReaderOptions, Result,
    lexical::{eq_keyword, is_digit, is_hex, is_number_byte, ltrim, match_keyword, trim},
};

/// Why the recognizer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reject {
    Malformed(usize),
    TooDeep,
}

struct Validator<'a> {
    buf: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Validator<'_> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    #[inline]
    fn skip_ws(&mut self) {
        self.pos = ltrim(self.buf, self.pos);
    }

    #[inline]
    fn fail<T>(&self) -> Result<T, Reject> {
        Err(Reject::Malformed(self.pos))
    }

    fn value(&mut self) -> Result<(), Reject> {
        match self.peek() {
            Some(b'{') => self.object(),
            Some(b'[') => self.array(),
            Some(b'"') => self.string(),
            Some(b'-' | b'0'..=b'9') => self.number(),
            Some(b'n' | b'N') => self.keyword(b"null"),
            Some(b't' | b'T') => self.keyword(b"true"),
            Some(b'f' | b'F') => self.keyword(b"false"),
            _ => self.fail(),
        }
    }

    fn keyword(&mut self, keyword: &[u8]) -> Result<(), Reject> {
        if match_keyword(&self.buf[self.pos..], keyword) {
            self.pos += keyword.len();
            Ok(())
        } else {
            self.fail()
        }
    }

    fn digits(&mut self) -> Result<(), Reject> {
        if !self.peek().is_some_and(is_digit) {
            return self.fail();
        }
        while self.peek().is_some_and(is_digit) {
            self.pos += 1;
        }
        Ok(())
    }

    fn number(&mut self) -> Result<(), Reject> {
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.digits()?,
            _ => return self.fail(),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.digits()?;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.digits()?;
        }
        Ok(())
    }

    fn string(&mut self) -> Result<(), Reject> {
        // opening quote
        self.pos += 1;
        loop {
            match self.peek() {
                None => return self.fail(),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(b'\\') => match self.buf.get(self.pos + 1) {
                    Some(
                        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' | b'B' | b'F'
                        | b'N' | b'R' | b'T',
                    ) => self.pos += 2,
                    Some(b'u') => {
                        let hex = self.buf.get(self.pos + 2..self.pos + 6);
                        if !hex.is_some_and(|h| h.iter().copied().all(is_hex)) {
                            self.pos += 2;
                            return self.fail();
                        }
                        self.pos += 6;
                    }
                    _ => {
                        self.pos += 1;
                        return self.fail();
                    }
                },
                Some(0x00..=0x1F) => return self.fail(),
                Some(_) => self.pos += 1,
            }
        }
    }

    fn enter(&mut self) -> Result<(), Reject> {
        if self.depth >= self.max_depth {
            return Err(Reject::TooDeep);
        }
        self.depth += 1;
        // opening bracket
        self.pos += 1;
        self.skip_ws();
        Ok(())
    }

    fn array(&mut self) -> Result<(), Reject> {
        self.enter()?;
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(());
        }
        loop {
            self.value()?;
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    self.skip_ws();
                }
                Some(b']') => {
                    self.pos += 1;
                    self.depth -= 1;
                    return Ok(());
                }
                _ => return self.fail(),
            }
        }
    }

    fn object(&mut self) -> Result<(), Reject> {
        self.enter()?;
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(());
        }
        loop {
            if self.peek() != Some(b'"') {
                return self.fail();
            }
            self.string()?;
            self.skip_ws();
            if self.peek() != Some(b':') {
                return self.fail();
            }
            self.pos += 1;
            self.skip_ws();
            self.value()?;
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    self.skip_ws();
                }
                Some(b'}') => {
                    self.pos += 1;
                    self.depth -= 1;
                    return Ok(());
                }
                _ => return self.fail(),
            }
        }
    }
}

/// Checks `buf` against the grammar and reports why it was rejected.
///
/// # Errors
///
/// - [`Error::Empty`] when `buf` is empty or only whitespace.
/// - [`Error::Malformed`] at the first byte that cannot continue a value.
/// - [`Error::DepthExceeded`] when more than `options.max_depth` containers
///   are open at once.
pub fn validate(buf: &[u8], options: &ReaderOptions) -> Result<()> {
    let start = ltrim(buf, 0);
    if start == buf.len() {
        return Err(Error::Empty);
    }
    let mut v = Validator {
        buf,
        pos: start,
        depth: 0,
        max_depth: options.max_depth,
    };
    let outcome = v.value().and_then(|()| {
        v.skip_ws();
        if v.pos == buf.len() {
            Ok(())
        } else {
            v.fail()
        }
    });
    outcome.map_err(|reject| match reject {
        Reject::Malformed(offset) => Error::malformed(buf, offset),
        Reject::TooDeep => Error::DepthExceeded(options.max_depth),
    })
}

/// Returns `true` when `buf` is a single well-formed JSON value surrounded by
/// optional whitespace.
///
/// ```rust
/// assert!(jsonpeek::is_json(br#" {"a": [1, 2.5, "x", TRUE]} "#));
/// assert!(!jsonpeek::is_json(b"[1,]"));
/// ```
#[must_use]
pub fn is_json(buf: &[u8]) -> bool {
    validate(buf, &ReaderOptions::default()).is_ok()
}

fn first_byte(buf: &[u8]) -> Option<u8> {
    buf.get(ltrim(buf, 0)).copied()
}

#[must_use]
pub fn is_json_object(buf: &[u8]) -> bool {
    first_byte(buf) == Some(b'{') && is_json(buf)
}

#[must_use]
pub fn is_json_array(buf: &[u8]) -> bool {
    first_byte(buf) == Some(b'[') && is_json(buf)
}

#[must_use]
pub fn is_json_string(buf: &[u8]) -> bool {
    first_byte(buf) == Some(b'"') && is_json(buf)
}

#[must_use]
pub fn is_json_number(buf: &[u8]) -> bool {
    matches!(first_byte(buf), Some(b'-' | b'0'..=b'9')) && is_json(buf)
}

/// `true`, in any ASCII case.
#[must_use]
pub fn is_json_true(buf: &[u8]) -> bool {
    eq_keyword(trim(buf), b"true")
}

/// `false`, in any ASCII case.
#[must_use]
pub fn is_json_false(buf: &[u8]) -> bool {
    eq_keyword(trim(buf), b"false")
}

/// `null`, in any ASCII case.
#[must_use]
pub fn is_json_null(buf: &[u8]) -> bool {
    eq_keyword(trim(buf), b"null")
}

fn is_empty_container(buf: &[u8], open: u8, close: u8) -> bool {
    match trim(buf) {
        [o, inner @ .., c] if *o == open && *c == close => trim(inner).is_empty(),
        _ => false,
    }
}

/// `{}` with only whitespace between the braces.
#[must_use]
pub fn is_empty_object(buf: &[u8]) -> bool {
    is_empty_container(buf, b'{', b'}')
}

/// `[]` with only whitespace between the brackets.
#[must_use]
pub fn is_empty_array(buf: &[u8]) -> bool {
    is_empty_container(buf, b'[', b']')
}

/// Guesses the kind of the value starting at the first non-whitespace byte at
/// or after `start`, looking at as little input as possible.
///
/// Nothing is validated, so malformed input can be misreported; use
/// [`get_kind_strict`] when that matters.
#[must_use]
pub fn get_kind(buf: &[u8], start: usize) -> Kind {
    let i = ltrim(buf, start);
    match buf.get(i) {
        Some(b'{') => Kind::Object,
        Some(b'[') => Kind::Array,
        Some(b'"') => Kind::String,
        Some(b't' | b'T' | b'f' | b'F') => Kind::Bool,
        Some(b'n' | b'N') => Kind::Null,
        Some(b'-' | b'0'..=b'9') => number_kind(&buf[i..]),
        _ => Kind::Invalid,
    }
}

/// Classifies the number token at the start of `buf` by its maximal run.
pub(crate) fn number_kind(buf: &[u8]) -> Kind {
    let float = buf
        .iter()
        .take_while(|&&b| is_number_byte(b))
        .any(|&b| matches!(b, b'.' | b'e' | b'E'));
    if float { Kind::Float } else { Kind::Int }
}

/// Like [`get_kind`], but validates `buf[start..]` first and returns
/// [`Kind::Invalid`] when it is not a single well-formed value.
#[must_use]
pub fn get_kind_strict(buf: &[u8], start: usize) -> Kind {
    match buf.get(start..) {
        Some(rest) if is_json(rest) => get_kind(rest, 0),
        _ => Kind::Invalid,
    }
}
