use alloc::{collections::BTreeSet, string::ToString};

use quickcheck::QuickCheck;

use super::{arbitrary::JsonObject, quickcheck_tests};
use crate::{Value, is_json, merge_json, new_reader};

/// Property: The merged key set is the union of both key sets, keys only in
/// the patch or overridden by a non-object carry the patch value, and the
/// output is valid JSON.
#[test]
fn merge_key_union_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(base: JsonObject, patch: JsonObject) -> bool {
        let base_src = Value::Object(base.0.clone()).to_string();
        let patch_src = Value::Object(patch.0.clone()).to_string();
        let Ok(merged) = merge_json(base_src.as_bytes(), patch_src.as_bytes()) else {
            return false;
        };
        if !is_json(&merged) {
            return false;
        }
        let Ok(reader) = new_reader(&merged) else {
            return false;
        };

        let keys: BTreeSet<&str> = reader.keys().iter().map(|k| &**k).collect();
        let expected: BTreeSet<&str> = base
            .0
            .keys()
            .chain(patch.0.keys())
            .map(alloc::string::String::as_str)
            .collect();
        if keys != expected || reader.len() != expected.len() {
            return false;
        }

        patch.0.iter().all(|(key, value)| {
            let merged_value = reader.child(key).as_value();
            match (base.0.get(key), value) {
                (Some(Value::Object(_)), Value::Object(_)) => merged_value.is_object(),
                _ => merged_value == *value,
            }
        }) && base
            .0
            .iter()
            .filter(|(key, _)| !patch.0.contains_key(*key))
            .all(|(key, value)| reader.child(key).as_value() == *value)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(JsonObject, JsonObject) -> bool);
}

/// Property: Merging an object with itself reproduces it.
#[test]
fn merge_with_self_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(object: JsonObject) -> bool {
        let value = Value::Object(object.0);
        let src = value.to_string();
        merge_json(src.as_bytes(), src.as_bytes())
            .is_ok_and(|merged| merged == src.as_bytes())
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(JsonObject) -> bool);
}
