//! Reader surface, exercised through the public API only.

use jsonpeek::{Error, Kind, Reader, ReaderOptions, new_reader, path};

const DOC: &[u8] = br#"{
    "user": {
        "name": "Ada",
        "id": 42,
        "roles": ["admin", "dev"],
        "score": 9.5,
        "active": TRUE,
        "manager": null
    },
    "limits": {"cpu": "2", "memory": 512.75, "burst": true},
    "a.b": "dotted"
}"#;

fn reader() -> Reader<'static> {
    new_reader(DOC).expect("valid document")
}

#[test]
fn dynamic_value_snapshot() {
    let r = reader();
    insta::assert_snapshot!(r.get_value("user"), @r#"{"active":true,"id":42,"manager":null,"name":"Ada","roles":["admin","dev"],"score":9.5}"#);
    insta::assert_snapshot!(r.get_value("user.roles"), @r#"["admin","dev"]"#);
    insta::assert_snapshot!(r.get_value("missing"), @"null");
}

#[test]
fn key_order_snapshot() {
    let r = reader();
    insta::assert_snapshot!(format!("{:?}", r.keys()), @r#"["user", "limits", "a.b"]"#);
    insta::assert_snapshot!(format!("{:?}", r.get_keys("user")), @r#"["name", "id", "roles", "score", "active", "manager"]"#);
    insta::assert_snapshot!(format!("{:?}", r.get_keys("user.roles")), @r#"["0", "1"]"#);
}

#[test]
fn typed_maps_snapshot() {
    let r = reader();
    insta::assert_snapshot!(format!("{:?}", r.get_map_string_int("limits")), @r#"{"burst": 1, "cpu": 2, "memory": 512}"#);
    insta::assert_snapshot!(format!("{:?}", r.get_map_string_float("limits")), @r#"{"burst": 1.0, "cpu": 2.0, "memory": 512.75}"#);
    insta::assert_snapshot!(format!("{:?}", r.get_map_string_string("limits")), @r#"{"burst": "true", "cpu": "2", "memory": "512.75"}"#);
    insta::assert_snapshot!(format!("{:?}", r.get_map_string_bool("limits")), @r#"{"burst": true, "cpu": false, "memory": true}"#);
}

#[test]
fn kinds_at_paths() {
    let r = reader();
    let cases = [
        ("", Kind::Object),
        ("user.name", Kind::String),
        ("user.id", Kind::Int),
        ("user.score", Kind::Float),
        ("user.active", Kind::Bool),
        ("user.manager", Kind::Null),
        ("user.roles", Kind::Array),
        ("user.roles.1", Kind::String),
        ("user.roles.2", Kind::Invalid),
        ("a.b", Kind::Invalid),
    ];
    for (path, kind) in cases {
        assert_eq!(r.kind_at(path), kind, "{path}");
        assert_eq!(r.exists(path), kind != Kind::Invalid, "{path}");
    }
    assert_eq!(r.child("a.b").as_string(), "dotted");
}

#[test]
fn path_macro_builds_lookups() {
    let r = reader();
    let role = 1;
    assert_eq!(r.get_string(&path!["user", "roles", role]), "dev");
    assert_eq!(r.get_string(&path![]), String::from_utf8_lossy(DOC).trim());
}

#[test]
fn errors_render_with_position() {
    insta::assert_snapshot!(new_reader(b"[1,]").unwrap_err(), @"malformed JSON at 1:4 (byte 3)");
    insta::assert_snapshot!(new_reader(b" ").unwrap_err(), @"empty input");
    let deep = Reader::with_options(b"[[[]]]", ReaderOptions { max_depth: 2 }).unwrap_err();
    assert_eq!(deep, Error::DepthExceeded(2));
    insta::assert_snapshot!(deep, @"nesting exceeds the maximum depth of 2");
}

#[test]
fn owned_input_outlives_nothing() {
    let owned: Vec<u8> = br#"{"list":[3,"4",5.5]}"#.to_vec();
    let r = new_reader(&owned).unwrap();
    let total: i64 = r.get("list").elements().map(|e| e.as_int()).sum();
    assert_eq!(total, 12);
    let kinds: Vec<Kind> = r.get("list").elements().map(|e| e.kind()).collect();
    assert_eq!(kinds, [Kind::Int, Kind::String, Kind::Float]);
}
