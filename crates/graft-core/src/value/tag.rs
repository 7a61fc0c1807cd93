use crate::value::Value;

///
/// ValueTag
///
/// Stable canonical value-variant tag used by ordering and diagnostics.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueTag {
    Blob = 1,
    Bool = 2,
    Float64 = 3,
    Int = 4,
    List = 5,
    Map = 6,
    Null = 7,
    Record = 8,
    Text = 9,
    Uint = 10,
}

impl ValueTag {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Bool => "bool",
            Self::Float64 => "float64",
            Self::Int => "int",
            Self::List => "list",
            Self::Map => "map",
            Self::Null => "null",
            Self::Record => "record",
            Self::Text => "text",
            Self::Uint => "uint",
        }
    }
}

#[must_use]
pub(crate) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Blob(_) => ValueTag::Blob,
        Value::Bool(_) => ValueTag::Bool,
        Value::Float64(_) => ValueTag::Float64,
        Value::Int(_) => ValueTag::Int,
        Value::List(_) => ValueTag::List,
        Value::Map(_) => ValueTag::Map,
        Value::Null => ValueTag::Null,
        Value::Record(_) => ValueTag::Record,
        Value::Text(_) => ValueTag::Text,
        Value::Uint(_) => ValueTag::Uint,
    }
}

///
/// Canonical Value Rank
///
/// Stable rank used for cross-variant ordering.
///
#[must_use]
pub(crate) const fn canonical_rank(value: &Value) -> u8 {
    // Tags are 1-based; rank is 0-based.
    canonical_tag(value).to_u8() - 1
}
