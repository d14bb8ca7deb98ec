//! End-to-end behaviour on small literal inputs.

use alloc::{string::String, vec};

use rstest::rstest;

use crate::{
    BindOptions, Bound, Decode, Error, Field, FieldType, Kind, Result, bind, decode_str,
    is_json, is_json_null, is_json_true, merge_json, new_reader,
};

#[rstest]
#[case(r#"{"open_new_window":"TrUe"}"#)]
#[case(r#"{"open_new_window":1}"#)]
#[case(r#"{"open_new_window":"1"}"#)]
#[case(r#"{"open_new_window":"true"}"#)]
#[case(r#"{"open_new_window":"t"}"#)]
#[case(r#"{"open_new_window":1.0}"#)]
fn lenient_bool(#[case] input: &str) {
    let r = new_reader(input.as_bytes()).unwrap();
    assert!(r.get_bool("open_new_window"));
}

#[test]
fn cross_typed_int() {
    let r = new_reader(br#"{"postal_codes":["123.45",67890,102.32,"0",true]}"#).unwrap();
    assert_eq!(r.get_int_slice("postal_codes"), vec![123, 67890, 102, 0, 1]);
    assert_eq!(
        r.get_float_slice("postal_codes"),
        vec![123.45, 67890.0, 102.32, 0.0, 1.0]
    );
    assert_eq!(
        r.get_bool_slice("postal_codes"),
        vec![false, true, true, false, true]
    );
}

#[test]
fn surrogate_pair_decode() {
    let r = new_reader(br#""\ud83d\udc4f""#).unwrap();
    assert_eq!(r.as_string(), "\u{1F44F}");
    assert_eq!(r.as_string().chars().count(), 1);

    let lone = new_reader(br#""\ud83d""#).unwrap();
    assert_eq!(lone.as_string(), r"\ud83d");
    assert_eq!(decode_str(br"\ud83d"), r"\ud83d");
}

#[test]
fn empty_member_merge() {
    let out = merge_json(br#"{"intBase":1}"#, br#"{"intPatch":0,"emptyObjectPatch":{}}"#)
        .unwrap();
    assert!(is_json(&out));
    let r = new_reader(&out).unwrap();
    assert_eq!(r.get_int("intBase"), 1);
    assert_eq!(r.kind_at("intPatch"), Kind::Int);
    assert_eq!(r.get_int("intPatch"), 0);
    assert_eq!(r.kind_at("emptyObjectPatch"), Kind::Object);
    assert!(r.get("emptyObjectPatch").is_empty());
}

#[test]
fn object_overridden_by_scalar() {
    let out = merge_json(
        br#"{"a":{"b":"d","e":{"pi":3.14}}}"#,
        br#"{"a":"override"}"#,
    )
    .unwrap();
    let r = new_reader(&out).unwrap();
    assert_eq!(r.kind_at("a"), Kind::String);
    assert_eq!(r.get_string("a"), "override");
    assert!(!r.exists("a.e.pi"));
}

#[derive(Debug, Default)]
struct Holder {
    value: i64,
}

impl<'a> Decode<'a> for Holder {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[Field::new("value", FieldType::Int)];
        FIELDS
    }

    fn set_field(&mut self, field: &Field, value: Bound<'a>) -> Result<()> {
        match value {
            Bound::Int(n) => self.value = n,
            _ => return Err(field.reject()),
        }
        Ok(())
    }
}

#[test]
fn strict_failure() {
    let input = br#"{"value":"12345"}"#;
    let strict = BindOptions {
        strict: true,
        ..BindOptions::default()
    };
    let err = bind(input, &mut Holder::default(), &strict).unwrap_err();
    assert_eq!(
        err,
        Error::Strict {
            field: String::from("value"),
            expected: FieldType::Int,
            found: Kind::String,
        }
    );

    let mut lenient = Holder::default();
    bind(input, &mut lenient, &BindOptions::default()).unwrap();
    assert_eq!(lenient.value, 12345);
}

#[test]
fn case_insensitive_keywords() {
    assert!(is_json_null(b"NULL"));
    assert!(is_json_true(b"TRUE"));
    let r = new_reader(b"[NULL, TRUE, False]").unwrap();
    assert_eq!(r.kind_at("0"), Kind::Null);
    assert!(r.get_bool("1"));
    assert!(!r.get_bool("2"));
}
