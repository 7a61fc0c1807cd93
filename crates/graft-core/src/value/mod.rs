mod compare;
mod tag;


use crate::types::Float64;
use serde::Serialize;
use std::cmp::Ordering;

// re-exports
pub use tag::ValueTag;

///
/// Value
///
/// Dynamic field value exchanged between records.
///
/// Null        → the field is empty (e.g. `Option::None`).
/// Record      → a nested record, flattened into named field values.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Float64(Float64),
    Int(i64),
    /// Ordered list of values; order is preserved.
    List(Vec<Self>),
    /// Key/value entries in the order the source map yielded them.
    Map(Vec<(Self, Self)>),
    Null,
    Record(RecordValue),
    Text(String),
    Uint(u64),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Zero-value policy shared by the preload resolver.
    ///
    /// Null, `false`, numeric zero, the empty string and empty
    /// blobs/lists/maps are zero. A record is never zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(v) => !v,
            Self::Int(v) => *v == 0,
            Self::Uint(v) => *v == 0,
            Self::Float64(v) => v.is_zero(),
            Self::Text(v) => v.is_empty(),
            Self::Blob(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Map(v) => v.is_empty(),
            Self::Record(_) => false,
        }
    }

    /// Stable canonical variant tag.
    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::canonical_tag(self)
    }

    /// Human-readable kind label for diagnostics.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        self.tag().label()
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Signed view of an integer value, converting from `Uint` when lossless.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Uint(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Unsigned view of an integer value, converting from `Int` when lossless.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint(v) => Some(*v),
            Self::Int(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    ///
    /// KEYS
    ///

    /// Lookup-key form of this value.
    ///
    /// Non-negative `Int`s become `Uint`, so a signed and an unsigned field
    /// holding the same number produce the same key. Other values are
    /// returned as-is.
    #[must_use]
    pub fn into_key(self) -> Self {
        match self {
            Self::Int(v) => u64::try_from(v).map_or(Self::Int(v), Self::Uint),
            other => other,
        }
    }

    /// Whether two values are the same lookup key.
    #[must_use]
    pub fn key_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Uint(b)) | (Self::Uint(b), Self::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            _ => self == other,
        }
    }

    /// Total canonical comparator.
    #[must_use]
    pub fn canonical_cmp(left: &Self, right: &Self) -> Ordering {
        compare::canonical_cmp(left, right)
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        compare::canonical_cmp(self, other)
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Uint(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(Float64::new(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Blob(v)
    }
}

impl From<RecordValue> for Value {
    fn from(v: RecordValue) -> Self {
        Self::Record(v)
    }
}

///
/// RecordValue
///
/// A record flattened into its model's ordered `(field name, value)` pairs.
/// `path` is the source record's type path.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RecordValue {
    pub path: &'static str,
    pub fields: Vec<(&'static str, Value)>,
}

impl RecordValue {
    #[must_use]
    pub const fn new(path: &'static str, fields: Vec<(&'static str, Value)>) -> Self {
        Self { path, fields }
    }

    /// Exact field lookup.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Case-insensitive field lookup; when several names fold to the same
    /// lowercase form the last one wins.
    #[must_use]
    pub fn get_ci(&self, name: &str) -> Option<&Value> {
        let wanted = name.to_lowercase();

        self.fields
            .iter()
            .rev()
            .find(|(field, _)| field.to_lowercase() == wanted)
            .map(|(_, value)| value)
    }
}
