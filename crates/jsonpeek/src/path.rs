//! Dotted paths.
//!
//! A path is a `.`-separated list of segments resolved one at a time from the
//! root: each segment is an exact object key, or a decimal index when the
//! current node is an array. The empty path names the root.
//!
//! There is no escaping, so a key that itself contains `.` cannot be reached
//! through a dotted path; use [`Reader::child`] for such keys.
//!
//! [`Reader::child`]: crate::Reader::child

use alloc::{string::String, sync::Arc};
use core::fmt::{self, Write};

use crate::node::Node;

pub type Index = usize;

/// One segment of a path, for building dotted paths with [`path!`].
///
/// [`path!`]: crate::path!
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'p> {
    Key(&'p str),
    Index(Index),
    /// A negative integer. It is written out as-is (`-1`), so it never names
    /// an array element and only matches an object key spelled that way.
    Negative(i64),
}

impl<'p> From<&'p str> for Segment<'p> {
    fn from(s: &'p str) -> Self {
        Self::Key(s)
    }
}

impl<'p> From<&'p String> for Segment<'p> {
    fn from(s: &'p String) -> Self {
        Self::Key(s)
    }
}

macro_rules! impl_unsigned_as_segment {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Segment<'_> {
                fn from(value: $t) -> Self {
                    #[allow(clippy::cast_possible_truncation)]
                    Segment::Index(value as Index)
                }
            }
        )+
    };
}
impl_unsigned_as_segment!(u8, u16, u32, u64, usize);

macro_rules! impl_signed_as_segment {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Segment<'_> {
                fn from(value: $t) -> Self {
                    #[allow(clippy::cast_lossless, clippy::cast_possible_truncation, clippy::unnecessary_cast)]
                    Index::try_from(value).map_or(Segment::Negative(value as i64), Segment::Index)
                }
            }
        )+
    };
}
impl_signed_as_segment!(i8, i16, i32, i64, isize);

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "{i}"),
            Self::Negative(n) => write!(f, "{n}"),
        }
    }
}

/// Joins segments into a dotted path.
#[must_use]
pub fn join(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        // writing into a `String` cannot fail
        let _ = write!(out, "{seg}");
    }
    out
}

/// Splits a dotted path into its segments; the empty path has none.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    (!path.is_empty())
        .then(|| path.split('.'))
        .into_iter()
        .flatten()
}

/// Walks `path` from `root`, returning the node it names.
pub(crate) fn resolve<'n, 'a>(root: &'n Arc<Node<'a>>, path: &str) -> Option<&'n Arc<Node<'a>>> {
    segments(path).try_fold(root, |node, seg| node.child(seg))
}
