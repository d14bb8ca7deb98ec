//! The reader surface: path lookups and lenient accessors over a parsed tree.

use alloc::{borrow::Cow, collections::BTreeMap, sync::Arc, vec::Vec};
use core::fmt;

use bstr::ByteSlice;

use crate::{
    Kind, ReaderOptions, Result, Value, coerce, guard,
    node::Node,
    path::resolve,
    validate::validate,
};

/// A read-only view of one value in a parsed document.
///
/// A reader either points at a node or is empty. Empty readers come from
/// paths that do not resolve; every accessor on them returns its zero value
/// (`""`, `0`, `0.0`, `false`, an empty slice or map).
///
/// Cloning is cheap, and readers can be shared across threads for as long as
/// the input they borrow lives.
///
/// ```rust
/// use jsonpeek::{Kind, new_reader};
///
/// let r = new_reader(br#"{"user":{"id":"42","tags":["a","b"]}}"#)?;
/// assert_eq!(r.get_int("user.id"), 42);
/// assert_eq!(r.get_string("user.tags.1"), "b");
/// assert_eq!(r.kind_at("user.tags"), Kind::Array);
/// assert!(!r.exists("user.name"));
/// assert_eq!(r.get_string("user.name"), "");
/// # Ok::<(), jsonpeek::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct Reader<'a> {
    node: Option<Arc<Node<'a>>>,
}

impl fmt::Debug for Reader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Some(node) => f
                .debug_tuple("Reader")
                .field(&node.kind())
                .field(&node.raw().as_bstr())
                .finish(),
            None => f.write_str("Reader(<absent>)"),
        }
    }
}

/// Two readers are equal when they point at the same kind and raw span.
impl PartialEq for Reader<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.raw() == other.raw()
    }
}

/// Validates `buf` and builds a reader over it with default options.
///
/// # Errors
///
/// See [`Reader::with_options`].
#[track_caller]
pub fn new_reader(buf: &[u8]) -> Result<Reader<'_>> {
    Reader::with_options(buf, ReaderOptions::default())
}

impl<'a> From<Arc<Node<'a>>> for Reader<'a> {
    fn from(node: Arc<Node<'a>>) -> Self {
        Self { node: Some(node) }
    }
}

/// Generates `get_*` accessors that resolve a path and delegate to `as_*`.
macro_rules! path_accessors {
    ($( $get:ident => $as:ident -> $ret:ty; )*) => {
        $(
            #[doc = concat!("[`Self::", stringify!($as), "`] of the value at `path`.")]
            #[must_use]
            pub fn $get(&self, path: &str) -> $ret {
                self.get(path).$as()
            }
        )*
    };
}

impl<'a> Reader<'a> {
    /// Validates `buf` and builds a reader over it.
    ///
    /// # Errors
    ///
    /// - [`Error::Empty`] for empty or blank input.
    /// - [`Error::Malformed`] when the input is not a single JSON value.
    /// - [`Error::DepthExceeded`] past `options.max_depth`.
    ///
    /// [`Error::Empty`]: crate::Error::Empty
    /// [`Error::Malformed`]: crate::Error::Malformed
    /// [`Error::DepthExceeded`]: crate::Error::DepthExceeded
    #[track_caller]
    pub fn with_options(buf: &'a [u8], options: ReaderOptions) -> Result<Self> {
        guard::capture("Reader::with_options", || {
            validate(buf, &options)?;
            let node = Node::build(buf, &options)?;
            Ok(Self::from(Arc::new(node)))
        })
    }

    /// A reader that points at nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self { node: None }
    }

    /// The node under this reader, if any.
    #[must_use]
    pub fn node(&self) -> Option<&Node<'a>> {
        self.node.as_deref()
    }

    /// Returns `true` when the reader points at a value.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.node.is_some()
    }

    /// A sub-reader at `path`; empty when the path does not resolve.
    #[must_use]
    pub fn get(&self, path: &str) -> Reader<'a> {
        Reader {
            node: self
                .node
                .as_ref()
                .and_then(|root| resolve(root, path))
                .cloned(),
        }
    }

    /// A sub-reader for one direct child, matching `key` literally (so keys
    /// containing `.` are reachable).
    #[must_use]
    pub fn child(&self, key: &str) -> Reader<'a> {
        Reader {
            node: self.node.as_ref().and_then(|n| n.child(key)).cloned(),
        }
    }

    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_present()
    }

    /// The kind of this value, or [`Kind::Invalid`] for an empty reader.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.node.as_ref().map_or(Kind::Invalid, |n| n.kind())
    }

    /// The kind at `path`, or [`Kind::Invalid`] when it does not resolve.
    #[must_use]
    pub fn kind_at(&self, path: &str) -> Kind {
        self.get(path).kind()
    }

    /// The trimmed raw span; empty for an empty reader.
    #[must_use]
    pub fn raw(&self) -> &'a [u8] {
        self.node.as_ref().map_or(&[][..], |n| n.raw())
    }

    /// The ordered key list: decoded keys for objects, `"0"`, `"1"`, … for
    /// arrays, nothing otherwise.
    #[must_use]
    pub fn keys(&self) -> &[Cow<'a, str>] {
        self.node.as_ref().map_or(&[][..], |n| n.keys())
    }

    #[must_use]
    pub fn get_keys(&self, path: &str) -> Vec<Cow<'a, str>> {
        self.get(path).keys().to_vec()
    }

    /// Number of children; `0` for scalars and empty readers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.node.as_ref().map_or(0, |n| n.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(key, child)` pairs in source order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Reader<'a>)> {
        self.node
            .iter()
            .flat_map(|n| n.entries())
            .map(|(k, child)| (&**k, Reader::from(child.clone())))
    }

    /// Children in source order.
    pub fn elements(&self) -> impl Iterator<Item = Reader<'a>> {
        self.node
            .iter()
            .flat_map(|n| n.children())
            .map(|child| Reader::from(child.clone()))
    }

    fn with_node<T>(&self, zero: T, f: impl FnOnce(&Node<'a>) -> T) -> T {
        self.node.as_deref().map_or(zero, f)
    }

    /// Strings are decoded, `null` reads as `"null"`, anything else is its
    /// raw span.
    #[must_use]
    pub fn as_string(&self) -> Cow<'a, str> {
        self.with_node(Cow::Borrowed(""), |n| coerce::to_str(n.raw(), n.kind()))
    }

    #[must_use]
    pub fn as_int(&self) -> i64 {
        self.with_node(0, |n| coerce::to_int(n.raw()))
    }

    #[must_use]
    pub fn as_float(&self) -> f64 {
        self.with_node(0.0, |n| coerce::to_float(n.raw()))
    }

    #[must_use]
    pub fn as_bool(&self) -> bool {
        self.with_node(false, |n| coerce::to_bool(n.raw(), n.kind()))
    }

    /// The raw bytes of the value; strings lose their outer quotes but keep
    /// their escapes.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.with_node(&[][..], |n| coerce::to_bytes(n.raw(), n.kind()))
    }

    /// The value and everything under it as a dynamic [`Value`].
    #[must_use]
    pub fn as_value(&self) -> Value {
        self.with_node(Value::Null, coerce::to_value)
    }

    fn collect_elements<T>(&self, f: impl Fn(&Node<'a>) -> T) -> Vec<T> {
        match self.node.as_deref() {
            Some(n) if n.kind() == Kind::Array => n.children().map(|c| f(c)).collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn as_string_slice(&self) -> Vec<Cow<'a, str>> {
        self.collect_elements(|n| coerce::to_str(n.raw(), n.kind()))
    }

    #[must_use]
    pub fn as_int_slice(&self) -> Vec<i64> {
        self.collect_elements(|n| coerce::to_int(n.raw()))
    }

    #[must_use]
    pub fn as_float_slice(&self) -> Vec<f64> {
        self.collect_elements(|n| coerce::to_float(n.raw()))
    }

    #[must_use]
    pub fn as_bool_slice(&self) -> Vec<bool> {
        self.collect_elements(|n| coerce::to_bool(n.raw(), n.kind()))
    }

    #[must_use]
    pub fn as_interface_slice(&self) -> Vec<Value> {
        self.collect_elements(coerce::to_value)
    }

    #[must_use]
    pub fn as_byte_slices(&self) -> Vec<&'a [u8]> {
        self.collect_elements(|n| coerce::to_bytes(n.raw(), n.kind()))
    }

    fn collect_members<T>(&self, f: impl Fn(&Node<'a>) -> T) -> BTreeMap<Cow<'a, str>, T> {
        match self.node.as_deref() {
            Some(n) if n.kind() == Kind::Object => {
                n.entries().map(|(k, c)| (k.clone(), f(c))).collect()
            }
            _ => BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn as_map_string_string(&self) -> BTreeMap<Cow<'a, str>, Cow<'a, str>> {
        self.collect_members(|n| coerce::to_str(n.raw(), n.kind()))
    }

    #[must_use]
    pub fn as_map_string_int(&self) -> BTreeMap<Cow<'a, str>, i64> {
        self.collect_members(|n| coerce::to_int(n.raw()))
    }

    #[must_use]
    pub fn as_map_string_float(&self) -> BTreeMap<Cow<'a, str>, f64> {
        self.collect_members(|n| coerce::to_float(n.raw()))
    }

    #[must_use]
    pub fn as_map_string_bool(&self) -> BTreeMap<Cow<'a, str>, bool> {
        self.collect_members(|n| coerce::to_bool(n.raw(), n.kind()))
    }

    #[must_use]
    pub fn as_map_string_interface(&self) -> BTreeMap<Cow<'a, str>, Value> {
        self.collect_members(coerce::to_value)
    }

    #[must_use]
    pub fn as_map_string_bytes(&self) -> BTreeMap<Cow<'a, str>, &'a [u8]> {
        self.collect_members(|n| coerce::to_bytes(n.raw(), n.kind()))
    }

    path_accessors! {
        get_string => as_string -> Cow<'a, str>;
        get_int => as_int -> i64;
        get_float => as_float -> f64;
        get_bool => as_bool -> bool;
        get_bytes => as_bytes -> &'a [u8];
        get_value => as_value -> Value;
        get_string_slice => as_string_slice -> Vec<Cow<'a, str>>;
        get_int_slice => as_int_slice -> Vec<i64>;
        get_float_slice => as_float_slice -> Vec<f64>;
        get_bool_slice => as_bool_slice -> Vec<bool>;
        get_interface_slice => as_interface_slice -> Vec<Value>;
        get_byte_slices => as_byte_slices -> Vec<&'a [u8]>;
        get_map_string_string => as_map_string_string -> BTreeMap<Cow<'a, str>, Cow<'a, str>>;
        get_map_string_int => as_map_string_int -> BTreeMap<Cow<'a, str>, i64>;
        get_map_string_float => as_map_string_float -> BTreeMap<Cow<'a, str>, f64>;
        get_map_string_bool => as_map_string_bool -> BTreeMap<Cow<'a, str>, bool>;
        get_map_string_interface => as_map_string_interface -> BTreeMap<Cow<'a, str>, Value>;
        get_map_string_bytes => as_map_string_bytes -> BTreeMap<Cow<'a, str>, &'a [u8]>;
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec, vec::Vec};

    use super::*;
    use crate::Error;

    const DOC: &[u8] = br#"
    {
        "name": "jsonpeek",
        "version": 3,
        "ratio": 0.25,
        "stable": "yes",
        "nested": {"list": [1, "2", 3.9, true, null], "empty": {}},
        "nothing": null,
        "escaped": "tab\there"
    }"#;

    #[test]
    fn root_accessors() {
        let r = new_reader(DOC).unwrap();
        assert_eq!(r.kind(), Kind::Object);
        assert_eq!(r.len(), 7);
        assert_eq!(
            r.keys(),
            ["name", "version", "ratio", "stable", "nested", "nothing", "escaped"]
        );
        assert!(r.raw().starts_with(b"{") && r.raw().ends_with(b"}"));
    }

    #[test]
    fn scalar_path_accessors() {
        let r = new_reader(DOC).unwrap();
        assert_eq!(r.get_string("name"), "jsonpeek");
        assert_eq!(r.get_int("version"), 3);
        assert!((r.get_float("ratio") - 0.25).abs() < f64::EPSILON);
        assert!(!r.get_bool("stable"));
        assert_eq!(r.get_string("nothing"), "null");
        assert_eq!(r.get_string("escaped"), "tab\there");
        assert_eq!(r.get_bytes("escaped"), br"tab\there");
        assert_eq!(r.get_string("version"), "3");
        assert_eq!(r.get_int("nested.list.1"), 2);
        assert_eq!(r.get_int("nested.list.2"), 3);
    }

    #[test]
    fn absent_paths_yield_zero_values() {
        let r = new_reader(DOC).unwrap();
        let missing = r.get("nested.nope");
        assert!(!missing.is_present());
        assert_eq!(missing.kind(), Kind::Invalid);
        assert_eq!(r.kind_at("nested.nope"), Kind::Invalid);
        assert_eq!(missing.as_string(), "");
        assert_eq!(missing.as_int(), 0);
        assert!(missing.as_float().abs() < f64::EPSILON);
        assert!(!missing.as_bool());
        assert!(missing.as_bytes().is_empty());
        assert!(missing.as_value().is_null());
        assert!(missing.keys().is_empty());
        assert!(missing.as_int_slice().is_empty());
        assert!(missing.as_map_string_int().is_empty());
        assert!(!missing.get("deeper").is_present());
    }

    #[test]
    fn slices_over_mixed_arrays() {
        let r = new_reader(DOC).unwrap();
        assert_eq!(r.get_int_slice("nested.list"), vec![1, 2, 3, 1, 0]);
        assert_eq!(
            r.get_string_slice("nested.list"),
            vec!["1", "2", "3.9", "true", "null"]
        );
        assert_eq!(
            r.get_bool_slice("nested.list"),
            vec![true, false, true, true, false]
        );
        assert_eq!(
            r.get_byte_slices("nested.list"),
            vec![&b"1"[..], b"2", b"3.9", b"true", b"null"]
        );
        assert_eq!(
            r.get_interface_slice("nested.list"),
            vec![
                Value::Int(1),
                Value::String("2".into()),
                Value::Float(3.9),
                Value::Bool(true),
                Value::Null
            ]
        );
        // not an array
        assert!(r.get_int_slice("nested").is_empty());
    }

    #[test]
    fn maps_over_objects() {
        let r = new_reader(br#"{"a": "1", "b": 2.5, "c": true}"#).unwrap();
        let ints = r.as_map_string_int();
        assert_eq!(ints.get("a"), Some(&1));
        assert_eq!(ints.get("b"), Some(&2));
        assert_eq!(ints.get("c"), Some(&1));
        let strings = r.get_map_string_string("");
        assert_eq!(strings["b"], "2.5");
        assert_eq!(
            r.as_map_string_bool().values().copied().collect::<Vec<_>>(),
            [true, true, true]
        );
        assert_eq!(r.as_map_string_bytes().get("a"), Some(&&b"1"[..]));
        assert_eq!(r.as_map_string_interface().len(), 3);
        assert!(r.get_map_string_float("a").is_empty());
    }

    #[test]
    fn entries_and_elements_follow_source_order() {
        let r = new_reader(br#"{"z": [3, 2], "a": {"k": "v"}}"#).unwrap();
        let keys: Vec<&str> = r.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, ["z", "a"]);
        let nums: Vec<i64> = r.get("z").elements().map(|e| e.as_int()).collect();
        assert_eq!(nums, [3, 2]);
        assert_eq!(r.get_keys("z"), ["0", "1"]);
        assert_eq!(r.get("a").child("k").as_string(), "v");
    }

    #[test]
    fn dotted_keys_need_child() {
        let r = new_reader(br#"{"a.b": 1}"#).unwrap();
        assert!(!r.exists("a.b"));
        assert_eq!(r.child("a.b").as_int(), 1);
    }

    #[test]
    fn sub_readers_share_the_tree() {
        let r = new_reader(br#"{"a":{"b":{"c":"d"}}}"#).unwrap();
        let a = r.get("a");
        let b = a.get("b");
        assert_eq!(b.get_string("c"), "d");
        assert_eq!(r.get("a.b").raw(), b.raw());
        assert_eq!(a.kind_at(""), Kind::Object);
    }

    #[test]
    fn readers_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Reader<'static>>();

        let buf = String::from(r#"{"n": 7}"#);
        let r = new_reader(buf.as_bytes()).unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                let r = r.clone();
                s.spawn(move || assert_eq!(r.get_int("n"), 7));
            }
        });
    }

    #[test]
    fn construction_errors() {
        assert_eq!(new_reader(b"").unwrap_err(), Error::Empty);
        assert!(matches!(
            new_reader(b"{\"a\":1,}").unwrap_err(),
            Error::Malformed { offset: 7, .. }
        ));
        assert_eq!(
            Reader::with_options(b"[[[]]]", ReaderOptions { max_depth: 2 }).unwrap_err(),
            Error::DepthExceeded(2)
        );
    }

    #[test]
    fn debug_output() {
        let r = new_reader(br#"[1, "x"]"#).unwrap();
        assert_eq!(alloc::format!("{r:?}"), r#"Reader(Array, "[1, \"x\"]")"#);
        assert_eq!(alloc::format!("{:?}", Reader::empty()), "Reader(<absent>)");
    }
}
