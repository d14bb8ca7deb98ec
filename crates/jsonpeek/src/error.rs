use alloc::string::String;

use thiserror::Error;

use crate::{Kind, bind::FieldType};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Every failure the tree builder, the merger, and the binder can surface.
///
/// Coercion accessors and validation predicates never produce an `Error`;
/// they fall back to zero values and `false` respectively.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("empty input")]
    Empty,
    #[error("malformed JSON at {line}:{column} (byte {offset})")]
    Malformed {
        offset: usize,
        line: usize,
        column: usize,
    },
    #[error("destination cannot accept field `{field}`")]
    BadContainer { field: String },
    #[error("field `{field}` expects {expected} but the input holds {found}")]
    Strict {
        field: String,
        expected: FieldType,
        found: Kind,
    },
    #[error("missing required field `{0}`")]
    MissingRequired(String),
    #[error("field `{0}` must not be empty")]
    EmptyNonempty(String),
    #[error("cannot merge {patch} into {base}: both inputs must be objects")]
    MergeType { base: Kind, patch: Kind },
    #[error("nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),
    #[error("internal error in `{entry}` called at {location}: {message}")]
    Internal {
        entry: &'static str,
        location: String,
        message: String,
    },
}

impl Error {
    /// Builds a [`Error::Malformed`] for `offset`, computing the 1-based line
    /// and column by counting line feeds before it.
    pub(crate) fn malformed(buf: &[u8], offset: usize) -> Self {
        let offset = offset.min(buf.len());
        let head = &buf[..offset];
        let line = 1 + head.iter().filter(|&&b| b == b'\n').count();
        let column = 1 + head
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(offset, |nl| offset - nl - 1);
        Self::Malformed {
            offset,
            line,
            column,
        }
    }
}
