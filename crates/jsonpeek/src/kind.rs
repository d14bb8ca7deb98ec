use core::fmt;

/// The JSON kind of a value.
///
/// `Int` and `Float` split what the grammar calls a number: a number with a
/// `.`, `e`, or `E` anywhere in it is a `Float`, anything else is an `Int`.
/// `Invalid` is only ever the result of classifying malformed input (or of
/// asking for the kind at a path that does not exist); it never appears in a
/// built tree.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
    Invalid,
}

impl Kind {
    /// Returns `true` for `Array` and `Object`.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }

    /// Returns `true` for `Int` and `Float`.
    #[must_use]
    pub fn is_number(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
