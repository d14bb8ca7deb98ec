//! Deep merge of two JSON objects, patch wins.

use alloc::vec::Vec;

use log::debug;

use crate::{Error, Kind, Result, guard, node::Node, reader::new_reader, value::escape_string};

/// Merges `patch` into `base` and returns the result as compact JSON.
///
/// For each key, a value only in one input is kept, two objects merge
/// recursively, and anything else takes the patch value whole (arrays are
/// replaced, never concatenated). Base keys come first in base order,
/// followed by patch-only keys in patch order.
///
/// Scalars are copied from their raw spans and strings keep their escapes;
/// only whitespace is dropped.
///
/// ```rust
/// let merged = jsonpeek::merge_json(
///     br#"{"a": {"b": 1, "c": [1, 2]}, "d": true}"#,
///     br#"{"a": {"c": [3], "e": null}, "f": "x"}"#,
/// )?;
/// assert_eq!(merged, br#"{"a":{"b":1,"c":[3],"e":null},"d":true,"f":"x"}"#);
/// # Ok::<(), jsonpeek::Error>(())
/// ```
///
/// # Errors
///
/// Parse errors from either input, and [`Error::MergeType`] when either input
/// is not an object.
#[track_caller]
pub fn merge_json(base: &[u8], patch: &[u8]) -> Result<Vec<u8>> {
    guard::capture("merge_json", || {
        let base_reader = new_reader(base)?;
        let patch_reader = new_reader(patch)?;
        let (Some(b), Some(p)) = (base_reader.node(), patch_reader.node()) else {
            return Err(Error::Empty);
        };
        if b.kind() != Kind::Object || p.kind() != Kind::Object {
            return Err(Error::MergeType {
                base: b.kind(),
                patch: p.kind(),
            });
        }
        let mut out = Vec::with_capacity(base.len() + patch.len());
        write_merged(&mut out, b, p);
        debug!(
            "merged {} base and {} patch keys into {} bytes",
            b.len(),
            p.len(),
            out.len()
        );
        Ok(out)
    })
}

fn write_key(out: &mut Vec<u8>, first: &mut bool, key: &str) {
    if !*first {
        out.push(b',');
    }
    *first = false;
    out.push(b'"');
    out.extend_from_slice(escape_string(key).as_bytes());
    out.extend_from_slice(b"\":");
}

/// Writes `member` under `key` unless it serializes to nothing.
fn write_member(out: &mut Vec<u8>, first: &mut bool, key: &str, member: &[u8]) {
    if member.is_empty() {
        return;
    }
    write_key(out, first, key);
    out.extend_from_slice(member);
}

fn write_merged(out: &mut Vec<u8>, base: &Node<'_>, patch: &Node<'_>) {
    let mut first = true;
    let mut member = Vec::new();
    out.push(b'{');
    for (key, b) in base.entries() {
        member.clear();
        match patch.child(key) {
            Some(p) if b.kind() == Kind::Object && p.kind() == Kind::Object => {
                write_merged(&mut member, b, p);
            }
            Some(p) => write_node(&mut member, p),
            None => write_node(&mut member, b),
        }
        write_member(out, &mut first, key, &member);
    }
    for (key, p) in patch.entries() {
        if base.child(key).is_none() {
            member.clear();
            write_node(&mut member, p);
            write_member(out, &mut first, key, &member);
        }
    }
    out.push(b'}');
}

fn write_node(out: &mut Vec<u8>, node: &Node<'_>) {
    match node.kind() {
        Kind::Object => {
            let mut first = true;
            let mut member = Vec::new();
            out.push(b'{');
            for (key, child) in node.entries() {
                member.clear();
                write_node(&mut member, child);
                write_member(out, &mut first, key, &member);
            }
            out.push(b'}');
        }
        Kind::Array => {
            out.push(b'[');
            let start = out.len();
            for child in node.children() {
                let before = out.len();
                if before > start {
                    out.push(b',');
                }
                let mark = out.len();
                write_node(out, child);
                if out.len() == mark {
                    out.truncate(before);
                }
            }
            out.push(b']');
        }
        _ => out.extend_from_slice(node.raw()),
    }
}
