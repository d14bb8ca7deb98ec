//! Table-driven binding of an object's members into caller types.
//!
//! A destination type describes itself with a static table of [`Field`]s and
//! receives coerced values one field at a time through [`Decode::set_field`].
//! The binder walks that table against the parsed tree:
//!
//! - the member is looked up by [`Field::key`]: the `tag` override, else the
//!   `json` name, else the field name; `"-"` skips the field,
//! - a missing member fails a `required` or `nonempty` field and otherwise
//!   leaves the destination untouched,
//! - `null` binds the field type's zero value; for a nested object that is
//!   [`Bound::ZeroObject`], which runs none of the nested field checks,
//! - in strict mode, a member whose kind does not fit the field type fails
//!   with [`Error::Strict`]; in lenient mode it is coerced.
//!
//! ```rust
//! use jsonpeek::{BindOptions, Bound, Decode, Error, Field, FieldType, Result, bind};
//!
//! #[derive(Default)]
//! struct Sample {
//!     value: i64,
//! }
//!
//! impl<'a> Decode<'a> for Sample {
//!     fn fields() -> &'static [Field] {
//!         const FIELDS: &[Field] = &[Field::new("value", FieldType::Int)];
//!         FIELDS
//!     }
//!
//!     fn set_field(&mut self, field: &Field, value: Bound<'a>) -> Result<()> {
//!         match value {
//!             Bound::Int(n) => self.value = n,
//!             _ => return Err(field.reject()),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let input = br#"{"value":"12345"}"#;
//! let mut lenient = Sample::default();
//! bind(input, &mut lenient, &BindOptions::default())?;
//! assert_eq!(lenient.value, 12345);
//!
//! let strict = BindOptions { strict: true, ..BindOptions::default() };
//! let err = bind(input, &mut Sample::default(), &strict).unwrap_err();
//! assert!(matches!(err, Error::Strict { .. }));
//! # Ok::<(), jsonpeek::Error>(())
//! ```

use alloc::{borrow::Cow, collections::BTreeMap, string::ToString, vec::Vec};
use core::{any::type_name, fmt};

use log::{debug, trace};

use crate::{
    Error, Kind, Reader, ReaderOptions, Result, Value, coerce::is_zero, guard, node::Node,
};

/// The shape a destination field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int,
    Float,
    Bool,
    /// Raw bytes; strings lose their quotes.
    Bytes,
    /// Any value, as a dynamic [`Value`].
    Value,
    StringSlice,
    IntSlice,
    FloatSlice,
    BoolSlice,
    ValueSlice,
    StringMap,
    /// A nested object bound through its own [`Decode`] impl.
    Object,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::Value => "any value",
            Self::StringSlice => "array of strings",
            Self::IntSlice => "array of ints",
            Self::FloatSlice => "array of floats",
            Self::BoolSlice => "array of bools",
            Self::ValueSlice => "array",
            Self::StringMap => "object of strings",
            Self::Object => "object",
        })
    }
}

impl FieldType {
    /// The element type of a slice field.
    fn element(self) -> Option<FieldType> {
        match self {
            Self::StringSlice => Some(Self::String),
            Self::IntSlice => Some(Self::Int),
            Self::FloatSlice => Some(Self::Float),
            Self::BoolSlice => Some(Self::Bool),
            Self::ValueSlice => Some(Self::Value),
            _ => None,
        }
    }

    /// Whether strict mode lets a value of `kind` bind to this field type.
    /// `null` is accepted everywhere and binds the zero value.
    #[must_use]
    pub fn accepts(self, kind: Kind) -> bool {
        match (self, kind) {
            (_, Kind::Null) | (Self::Value | Self::Bytes, _) => true,
            (Self::String, Kind::String)
            | (Self::Int | Self::Float, Kind::Int)
            | (Self::Float, Kind::Float)
            | (Self::Bool, Kind::Bool)
            | (Self::StringMap | Self::Object, Kind::Object) => true,
            (
                Self::StringSlice
                | Self::IntSlice
                | Self::FloatSlice
                | Self::BoolSlice
                | Self::ValueSlice,
                Kind::Array,
            ) => true,
            _ => false,
        }
    }

    /// Strict check over a whole node, including slice elements.
    fn accepts_node(self, node: &Node<'_>) -> Option<Kind> {
        if !self.accepts(node.kind()) {
            return Some(node.kind());
        }
        let element = self.element()?;
        node.children()
            .map(|child| child.kind())
            .find(|&kind| !element.accepts(kind))
    }

    /// The zero value bound for `null`.
    #[must_use]
    pub fn zero<'a>(self) -> Bound<'a> {
        match self {
            Self::String => Bound::String(Cow::Borrowed("")),
            Self::Int => Bound::Int(0),
            Self::Float => Bound::Float(0.0),
            Self::Bool => Bound::Bool(false),
            Self::Bytes => Bound::Bytes(&[]),
            Self::Value => Bound::Value(Value::Null),
            Self::StringSlice => Bound::StringSlice(Vec::new()),
            Self::IntSlice => Bound::IntSlice(Vec::new()),
            Self::FloatSlice => Bound::FloatSlice(Vec::new()),
            Self::BoolSlice => Bound::BoolSlice(Vec::new()),
            Self::ValueSlice => Bound::ValueSlice(Vec::new()),
            Self::StringMap => Bound::StringMap(BTreeMap::new()),
            Self::Object => Bound::ZeroObject,
        }
    }

    fn coerce<'a>(self, reader: &Reader<'a>, options: BindOptions) -> Bound<'a> {
        match self {
            Self::String => Bound::String(reader.as_string()),
            Self::Int => Bound::Int(reader.as_int()),
            Self::Float => Bound::Float(reader.as_float()),
            Self::Bool => Bound::Bool(reader.as_bool()),
            Self::Bytes => Bound::Bytes(reader.as_bytes()),
            Self::Value => Bound::Value(reader.as_value()),
            Self::StringSlice => Bound::StringSlice(reader.as_string_slice()),
            Self::IntSlice => Bound::IntSlice(reader.as_int_slice()),
            Self::FloatSlice => Bound::FloatSlice(reader.as_float_slice()),
            Self::BoolSlice => Bound::BoolSlice(reader.as_bool_slice()),
            Self::ValueSlice => Bound::ValueSlice(reader.as_interface_slice()),
            Self::StringMap => Bound::StringMap(reader.as_map_string_string()),
            Self::Object => Bound::Object(reader.clone(), options),
        }
    }
}

/// A coerced value handed to [`Decode::set_field`].
#[derive(Debug, Clone, PartialEq)]
pub enum Bound<'a> {
    String(Cow<'a, str>),
    Int(i64),
    Float(f64),
    Bool(bool),
    Bytes(&'a [u8]),
    Value(Value),
    StringSlice(Vec<Cow<'a, str>>),
    IntSlice(Vec<i64>),
    FloatSlice(Vec<f64>),
    BoolSlice(Vec<bool>),
    ValueSlice(Vec<Value>),
    StringMap(BTreeMap<Cow<'a, str>, Cow<'a, str>>),
    /// The nested object and the options to bind it with, typically through
    /// [`Reader::bind_into`].
    Object(Reader<'a>, BindOptions),
    /// A `null` nested object; the destination resets it to its zero value
    /// without binding.
    ZeroObject,
}

/// One entry in a destination's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// The destination's own name for the field.
    pub name: &'static str,
    pub ty: FieldType,
    json: Option<&'static str>,
    tag: Option<&'static str>,
    required: bool,
    nonempty: bool,
}

impl Field {
    #[must_use]
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            json: None,
            tag: None,
            required: false,
            nonempty: false,
        }
    }

    /// The generic member name.
    #[must_use]
    pub const fn json(self, key: &'static str) -> Self {
        Self {
            json: Some(key),
            ..self
        }
    }

    /// A library-specific member name; wins over [`Field::json`].
    #[must_use]
    pub const fn tag(self, key: &'static str) -> Self {
        Self {
            tag: Some(key),
            ..self
        }
    }

    /// Fail when the member is missing.
    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Fail when the member is missing or holds its kind's zero value.
    #[must_use]
    pub const fn nonempty(self) -> Self {
        Self {
            nonempty: true,
            ..self
        }
    }

    /// The member name this field binds from.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.tag.or(self.json).unwrap_or(self.name)
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn is_nonempty(&self) -> bool {
        self.nonempty
    }

    /// The error a destination returns for a value it has nowhere to store.
    #[must_use]
    pub fn reject(&self) -> Error {
        Error::BadContainer {
            field: self.name.to_string(),
        }
    }
}

/// A destination the binder can populate.
pub trait Decode<'a> {
    /// The field table, in binding order.
    fn fields() -> &'static [Field];

    /// Stores one coerced value.
    ///
    /// # Errors
    ///
    /// Return [`Field::reject`] when the destination has no slot for `value`,
    /// or the error from binding a nested [`Bound::Object`].
    fn set_field(&mut self, field: &Field, value: Bound<'a>) -> Result<()>;

    /// Runs after binding with the input bytes and the binding outcome; the
    /// returned result replaces the outcome.
    ///
    /// # Errors
    ///
    /// Whatever the destination decides; the default passes `result` through.
    fn post_decode(&mut self, raw: &[u8], result: Result<()>) -> Result<()> {
        let _ = raw;
        result
    }
}

/// Binder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindOptions {
    /// Reject members whose kind does not fit the field type instead of
    /// coercing them.
    pub strict: bool,
    /// Options for parsing the input.
    pub reader: ReaderOptions,
}

/// Parses `buf` and binds its members into `target`.
///
/// `target.post_decode` sees the outcome, parse errors included.
///
/// # Errors
///
/// - Parse errors from [`Reader::with_options`].
/// - [`Error::MissingRequired`] and [`Error::EmptyNonempty`] from field checks.
/// - [`Error::Strict`] in strict mode.
/// - Whatever `set_field` or `post_decode` return.
#[track_caller]
pub fn bind<'a, T: Decode<'a>>(buf: &'a [u8], target: &mut T, options: &BindOptions) -> Result<()> {
    guard::capture("bind", || {
        let result = Reader::with_options(buf, options.reader)
            .and_then(|reader| bind_fields(&reader, target, *options));
        target.post_decode(buf, result)
    })
}

impl<'a> Reader<'a> {
    /// Binds the members of this object into `target`, then runs its
    /// `post_decode` with this value's raw span.
    ///
    /// # Errors
    ///
    /// As [`bind`], minus parse errors.
    pub fn bind_into<T: Decode<'a>>(&self, target: &mut T, options: &BindOptions) -> Result<()> {
        let result = bind_fields(self, target, *options);
        target.post_decode(self.raw(), result)
    }
}

fn bind_fields<'a, T: Decode<'a>>(
    reader: &Reader<'a>,
    target: &mut T,
    options: BindOptions,
) -> Result<()> {
    let is_object = reader.kind() == Kind::Object;
    let mut bound = 0usize;
    for field in T::fields() {
        let key = field.key();
        if key == "-" {
            continue;
        }
        let member = if is_object {
            reader.child(key)
        } else {
            Reader::empty()
        };
        let Some(node) = member.node() else {
            trace!("{key}: missing");
            if field.required {
                return Err(Error::MissingRequired(key.to_string()));
            }
            if field.nonempty {
                return Err(Error::EmptyNonempty(key.to_string()));
            }
            continue;
        };
        if field.nonempty && is_zero(node) {
            return Err(Error::EmptyNonempty(key.to_string()));
        }
        let value = if node.kind() == Kind::Null {
            trace!("{key}: null, binding zero {}", field.ty);
            field.ty.zero()
        } else {
            if options.strict {
                if let Some(found) = field.ty.accepts_node(node) {
                    return Err(Error::Strict {
                        field: key.to_string(),
                        expected: field.ty,
                        found,
                    });
                }
            }
            trace!("{key}: {} as {}", node.kind(), field.ty);
            field.ty.coerce(&member, options)
        };
        target.set_field(field, value)?;
        bound += 1;
    }
    debug!("bound {bound} of {} fields into {}", T::fields().len(), type_name::<T>());
    Ok(())
}
