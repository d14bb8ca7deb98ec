use alloc::{string::ToString, sync::Arc, vec::Vec};

use quickcheck::QuickCheck;

use super::quickcheck_tests;
use crate::{
    Kind, Node, Reader, ReaderOptions, Value, get_kind_strict, is_json, is_whitespace, new_reader,
    trim, validate,
};

fn walk<'n, 'a>(node: &'n Arc<Node<'a>>, out: &mut Vec<&'n Arc<Node<'a>>>) {
    out.push(node);
    for child in node.children() {
        walk(child, out);
    }
}

/// Property: Rendering a `Value` and reading it back yields the same value.
#[test]
fn value_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let src = value.to_string();
        is_json(src.as_bytes())
            && new_reader(src.as_bytes()).is_ok_and(|r| r.as_value() == value)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: Every node re-parses from its own raw span to an equal node,
/// and containers have one key per child.
#[test]
fn subtree_reparse_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let src = value.to_string();
        let Ok(reader) = new_reader(src.as_bytes()) else {
            return false;
        };
        let Some(root) = reader.node() else {
            return false;
        };
        let root = Arc::new(root.clone());
        let mut nodes = Vec::new();
        walk(&root, &mut nodes);
        nodes.into_iter().all(|node| {
            let reparsed = Node::build(node.raw(), &ReaderOptions::default());
            let keys_match = !node.kind().is_container() || node.keys().len() == node.len();
            keys_match && reparsed.as_ref() == Ok(&**node)
        })
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: For arbitrary bytes, the validator and the reader agree, and a
/// successful reader reports the same root kind as the strict classifier.
#[test]
fn validator_agrees_with_reader_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>) -> bool {
        let reader = new_reader(&bytes);
        let agree = is_json(&bytes) == reader.is_ok()
            && validate(&bytes, &ReaderOptions::default()).is_ok() == reader.is_ok();
        agree
            && reader.map_or(true, |r: Reader<'_>| {
                r.kind() == get_kind_strict(&bytes, 0) && r.kind() != Kind::Invalid
            })
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}

/// Property: Anything `serde_json` accepts is accepted here, with the same
/// number of top-level members.
#[test]
fn serde_json_acceptance_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let src = value.to_string();
        let Ok(oracle) = serde_json::from_str::<serde_json::Value>(&src) else {
            return true;
        };
        let rendered = oracle.to_string();
        let Ok(reader) = new_reader(rendered.as_bytes()) else {
            return false;
        };
        match &oracle {
            serde_json::Value::Object(map) => reader.len() == map.len(),
            serde_json::Value::Array(items) => reader.len() == items.len(),
            _ => reader.len() == 0,
        }
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: Trimming is idempotent and leaves no whitespace at either end.
#[quickcheck_macros::quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn trim_is_idempotent(bytes: Vec<u8>) -> bool {
    let once = trim(&bytes);
    trim(once) == once
        && once.first().is_none_or(|&b| !is_whitespace(b))
        && once.last().is_none_or(|&b| !is_whitespace(b))
}
