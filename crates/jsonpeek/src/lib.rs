//! Read-only, type-lenient JSON inspection.
//!
//! Validate bytes against the JSON grammar, build a tree that borrows from
//! the input, walk it with dotted paths, and read any value as any primitive
//! without failing: a string holding `"42"` reads as the int `42`, a `1.0`
//! reads as `true`, and a path that does not exist reads as a zero value.
//!
//! ```rust
//! use jsonpeek::{Kind, new_reader};
//!
//! let r = new_reader(br#"{"postal_codes":["123.45",67890,102.32,"0",true]}"#)?;
//! assert_eq!(r.get_int_slice("postal_codes"), [123, 67890, 102, 0, 1]);
//! assert_eq!(r.get_bool_slice("postal_codes"), [false, true, true, false, true]);
//! assert_eq!(r.kind_at("postal_codes.4"), Kind::Bool);
//! # Ok::<(), jsonpeek::Error>(())
//! ```
//!
//! Keywords are matched without regard to ASCII case, so `TRUE` and `Null`
//! are accepted wherever `true` and `null` are.

#![allow(missing_docs)]
extern crate alloc;

mod bind;
mod coerce;
mod error;
mod guard;
mod kind;
mod lexical;
mod merge;
mod node;
mod options;
pub mod path;
mod reader;
mod scanner;
mod validate;
mod value;

#[cfg(test)]
mod tests;

pub use bind::{BindOptions, Bound, Decode, Field, FieldType, bind};
pub use coerce::{decode_str, to_bool, to_bytes, to_float, to_int, to_str};
pub use error::{Error, Result};
pub use kind::Kind;
pub use lexical::{
    eq_keyword, is_digit, is_hex, is_terminator, is_whitespace, ltrim, match_keyword, trim,
};
pub use merge::merge_json;
pub use node::Node;
pub use options::{DEFAULT_MAX_DEPTH, ReaderOptions};
pub use path::Segment;
pub use reader::{Reader, new_reader};
pub use scanner::{Scanned, scan};
pub use validate::{
    get_kind, get_kind_strict, is_empty_array, is_empty_object, is_json, is_json_array,
    is_json_false, is_json_null, is_json_number, is_json_object, is_json_string, is_json_true,
    validate,
};
pub use value::{Array, Map, Value};

/// Builds a dotted path from a list of keys and indices.
///
/// ```rust
/// use jsonpeek::{new_reader, path};
///
/// let r = new_reader(br#"{"users":[{"name":"ada"}]}"#)?;
/// let field = "name";
/// assert_eq!(path!["users", 0, field], "users.0.name");
/// assert_eq!(r.get_string(&path!["users", 0, field]), "ada");
/// # Ok::<(), jsonpeek::Error>(())
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {
        $crate::path::join(&[$($crate::Segment::from($elem)),*])
    };
}
