//! Lenient coercion from a raw span and its kind to a requested primitive.
//!
//! None of these functions fail. Anything that cannot be converted yields the
//! zero value of the target type.
//!
//! | source        | string           | int               | float            | bool                  |
//! |---------------|------------------|-------------------|------------------|-----------------------|
//! | `String`      | decoded contents | parsed contents   | parsed contents  | bool literal contents |
//! | `Int`/`Float` | raw span         | parsed, truncated | parsed           | nonzero               |
//! | `Bool`        | raw span         | `true` → 1        | `true` → 1.0     | `true` in any case    |
//! | `Null`        | `"null"`         | 0                 | 0.0              | false                 |
//! | containers    | raw span         | 0                 | 0.0              | false                 |
//!
//! Bool literals are `true`, `false`, `t`, `f`, `1`, and `0`, in any ASCII
//! case.

use alloc::{
    borrow::Cow,
    string::{String, ToString},
    vec::Vec,
};

use bstr::ByteSlice;

use crate::{
    Kind,
    lexical::{eq_keyword, trim, unquote},
    node::Node,
    value::{Map, Value},
};

/// Decodes the contents of a JSON string (without its quotes).
///
/// Borrows from `inner` unless an escape sequence is present or the bytes are
/// not valid UTF-8.
///
/// - `\"`, `\\`, `\/` and `\b`, `\f`, `\n`, `\r`, `\t` (in either case) map to
///   the characters they name.
/// - `\uXXXX` decodes to its code point. A high surrogate immediately followed
///   by `\uYYYY` holding a low surrogate is combined into one character.
/// - Any escape that cannot be decoded, including an unpaired surrogate, is
///   copied through literally.
///
/// ```rust
/// use jsonpeek::decode_str;
///
/// assert_eq!(decode_str(br"\ud83d\udc4f"), "\u{1F44F}");
/// assert_eq!(decode_str(br"\ud83d!"), r"\ud83d!");
/// assert_eq!(decode_str(br"a\Tb"), "a\tb");
/// ```
#[must_use]
pub fn decode_str(inner: &[u8]) -> Cow<'_, str> {
    let Some(first) = inner.find_byte(b'\\') else {
        return String::from_utf8_lossy(inner);
    };
    let mut out = Vec::with_capacity(inner.len());
    out.extend_from_slice(&inner[..first]);
    let mut i = first;
    while i < inner.len() {
        let b = inner[i];
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }
        let simple = match inner.get(i + 1) {
            Some(b'"') => Some(b'"'),
            Some(b'\\') => Some(b'\\'),
            Some(b'/') => Some(b'/'),
            Some(b'b' | b'B') => Some(0x08),
            Some(b'f' | b'F') => Some(0x0C),
            Some(b'n' | b'N') => Some(b'\n'),
            Some(b'r' | b'R') => Some(b'\r'),
            Some(b't' | b'T') => Some(b'\t'),
            _ => None,
        };
        if let Some(c) = simple {
            out.push(c);
            i += 2;
        } else if inner.get(i + 1) == Some(&b'u') {
            i += unicode_escape(&inner[i..], &mut out);
        } else {
            out.push(b'\\');
            i += 1;
        }
    }
    Cow::Owned(match String::from_utf8(out) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

fn hex4(buf: &[u8]) -> Option<u32> {
    let digits = buf.get(..4)?;
    let s = core::str::from_utf8(digits).ok()?;
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    u32::from_str_radix(s, 16).ok()
}

/// Decodes the `\u` escape at the start of `esc`, appending UTF-8 to `out`.
/// Returns how many input bytes were consumed.
fn unicode_escape(esc: &[u8], out: &mut Vec<u8>) -> usize {
    let Some(code) = hex4(&esc[2..]) else {
        out.push(b'\\');
        return 1;
    };
    if (0xD800..=0xDBFF).contains(&code) && esc.get(6..8) == Some(b"\\u") {
        if let Some(low) = hex4(&esc[8..]).filter(|low| (0xDC00..=0xDFFF).contains(low)) {
            let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
            if let Some(ch) = char::from_u32(combined) {
                push_char(out, ch);
                return 12;
            }
        }
    }
    match char::from_u32(code) {
        Some(ch) => push_char(out, ch),
        // unpaired surrogate
        None => out.extend_from_slice(&esc[..6]),
    }
    6
}

fn push_char(out: &mut Vec<u8>, ch: char) {
    let mut tmp = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
}

/// Coerces to a string: strings are decoded, `null` becomes `"null"`, and
/// everything else is the raw span.
#[must_use]
pub fn to_str(raw: &[u8], kind: Kind) -> Cow<'_, str> {
    let raw = trim(raw);
    match kind {
        Kind::String => decode_str(unquote(raw)),
        Kind::Null => Cow::Borrowed("null"),
        _ => String::from_utf8_lossy(raw),
    }
}

fn unquoted_text(raw: &[u8]) -> Option<&str> {
    core::str::from_utf8(trim(unquote(raw))).ok()
}

/// Coerces to a signed integer.
///
/// `true` (any case) is `1`. Otherwise outer quotes are stripped and the text
/// is parsed as an integer, then as a float truncated toward zero. Anything
/// else, including non-finite floats, is `0`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_int(raw: &[u8]) -> i64 {
    let raw = trim(raw);
    if eq_keyword(raw, b"true") {
        return 1;
    }
    let Some(text) = unquoted_text(raw) else {
        return 0;
    };
    if let Ok(n) = text.parse::<i64>() {
        return n;
    }
    match text.parse::<f64>() {
        // `as` saturates at the i64 bounds
        Ok(f) if f.is_finite() => f.trunc() as i64,
        _ => 0,
    }
}

/// Coerces to a float. `true` (any case) is `1.0`; unparsable input is `0.0`.
#[must_use]
pub fn to_float(raw: &[u8]) -> f64 {
    let raw = trim(raw);
    if eq_keyword(raw, b"true") {
        return 1.0;
    }
    unquoted_text(raw)
        .and_then(|text| text.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parses `true`, `false`, `t`, `f`, `1`, or `0`, ignoring ASCII case.
fn parse_bool_literal(text: &[u8]) -> Option<bool> {
    match text {
        b"1" => Some(true),
        b"0" => Some(false),
        _ if eq_keyword(text, b"true") || eq_keyword(text, b"t") => Some(true),
        _ if eq_keyword(text, b"false") || eq_keyword(text, b"f") => Some(false),
        _ => None,
    }
}

/// Coerces to a bool.
///
/// `true` in any case is `true`; numbers are `true` when nonzero; anything
/// else is stripped of its quotes and read as a bool literal, defaulting to
/// `false`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn to_bool(raw: &[u8], kind: Kind) -> bool {
    let raw = trim(raw);
    if eq_keyword(raw, b"true") {
        return true;
    }
    if kind.is_number() {
        return to_float(raw) != 0.0;
    }
    parse_bool_literal(trim(unquote(raw))).unwrap_or(false)
}

/// Raw bytes of a value; strings lose their outer quotes but keep escapes.
#[must_use]
pub fn to_bytes(raw: &[u8], kind: Kind) -> &[u8] {
    match kind {
        Kind::String => unquote(raw),
        _ => raw,
    }
}

/// Returns `true` when the node holds the zero value of its kind: `null`,
/// `""`, `0`, `0.0`, `false`, `[]`, or `{}`.
#[allow(clippy::float_cmp)]
pub(crate) fn is_zero(node: &Node<'_>) -> bool {
    match node.kind() {
        Kind::Null | Kind::Invalid => true,
        Kind::Bool => !to_bool(node.raw(), Kind::Bool),
        Kind::Int => to_int(node.raw()) == 0,
        Kind::Float => to_float(node.raw()) == 0.0,
        Kind::String => unquote(node.raw()).is_empty(),
        Kind::Array | Kind::Object => node.is_empty(),
    }
}

/// Converts a node and everything under it to a dynamic [`Value`].
pub(crate) fn to_value(node: &Node<'_>) -> Value {
    match node.kind() {
        Kind::Null | Kind::Invalid => Value::Null,
        Kind::Bool => Value::Bool(to_bool(node.raw(), Kind::Bool)),
        Kind::Int => Value::Int(to_int(node.raw())),
        Kind::Float => Value::Float(to_float(node.raw())),
        Kind::String => Value::String(to_str(node.raw(), Kind::String).into_owned()),
        Kind::Array => Value::Array(node.children().map(|child| to_value(child)).collect()),
        Kind::Object => Value::Object(
            node.entries()
                .map(|(key, child)| (key.to_string(), to_value(child)))
                .collect::<Map>(),
        ),
    }
}
