use crate::{model::RecordModel, traits::FieldSetError, value::Value};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    hash::{BuildHasher, Hash},
    rc::Rc,
    sync::Arc,
};

///
/// FieldValue
///
/// Conversion boundary between a field's Rust type and `Value`.
///
/// `record_model` reports the record type reachable through the field,
/// which is what lets a field act as an association.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;

    /// Like `from_value`, but keeps the cause when a nested record
    /// cannot be rebuilt.
    fn try_from_value(value: &Value) -> Result<Self, FieldSetError>
    where
        Self: Sized,
    {
        Self::from_value(value).ok_or(FieldSetError::Incompatible)
    }

    #[must_use]
    fn record_model() -> Option<&'static RecordModel>
    where
        Self: Sized,
    {
        None
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

// impl_int_field_value
// Integers read from either signed or unsigned values when lossless.
macro_rules! impl_int_field_value {
    ( $( $type:ty => $variant:ident via $accessor:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    value.$accessor().and_then(|v| v.try_into().ok())
                }
            }
        )*
    };
}

impl_int_field_value!(
    i8 => Int via as_i64,
    i16 => Int via as_i64,
    i32 => Int via as_i64,
    i64 => Int via as_i64,
    u8 => Uint via as_u64,
    u16 => Uint via as_u64,
    u32 => Uint via as_u64,
    u64 => Uint via as_u64,
);

// pointer-sized integers are at most 64 bits wide on supported targets
impl FieldValue for usize {
    fn to_value(&self) -> Value {
        Value::Uint(*self as u64)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_u64().and_then(|v| v.try_into().ok())
    }
}

impl FieldValue for isize {
    fn to_value(&self) -> Value {
        Value::Int(*self as i64)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|v| v.try_into().ok())
    }
}

// one-character text
impl FieldValue for char {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let mut chars = value.as_text()?.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if matches!(value, Value::Null) {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }

    fn try_from_value(value: &Value) -> Result<Self, FieldSetError> {
        if matches!(value, Value::Null) {
            return Ok(None);
        }

        T::try_from_value(value).map(Some)
    }

    fn record_model() -> Option<&'static RecordModel> {
        T::record_model()
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Self::new)
    }

    fn try_from_value(value: &Value) -> Result<Self, FieldSetError> {
        T::try_from_value(value).map(Self::new)
    }

    fn record_model() -> Option<&'static RecordModel> {
        T::record_model()
    }
}

impl<T: FieldValue> FieldValue for Rc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Self::new)
    }

    fn try_from_value(value: &Value) -> Result<Self, FieldSetError> {
        T::try_from_value(value).map(Self::new)
    }

    fn record_model() -> Option<&'static RecordModel> {
        T::record_model()
    }
}

impl<T: FieldValue> FieldValue for Arc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Self::new)
    }

    fn try_from_value(value: &Value) -> Result<Self, FieldSetError> {
        T::try_from_value(value).map(Self::new)
    }

    fn record_model() -> Option<&'static RecordModel> {
        T::record_model()
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        items.iter().map(T::from_value).collect()
    }

    fn try_from_value(value: &Value) -> Result<Self, FieldSetError> {
        let Value::List(items) = value else {
            return Err(FieldSetError::Incompatible);
        };

        items.iter().map(T::try_from_value).collect()
    }
}

impl<K, V> FieldValue for BTreeMap<K, V>
where
    K: FieldValue + Ord,
    V: FieldValue,
{
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::Map(entries) = value else {
            return None;
        };

        entries
            .iter()
            .map(|(k, v)| Some((K::from_value(k)?, V::from_value(v)?)))
            .collect()
    }
}

impl<K, V, S> FieldValue for HashMap<K, V, S>
where
    K: FieldValue + Eq + Hash,
    V: FieldValue,
    S: BuildHasher + Default,
{
    // entries are sorted by key so equal maps produce equal values
    fn to_value(&self) -> Value {
        let mut entries: Vec<_> = self
            .iter()
            .map(|(k, v)| (k.to_value(), v.to_value()))
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        Value::Map(entries)
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::Map(entries) = value else {
            return None;
        };

        entries
            .iter()
            .map(|(k, v)| Some((K::from_value(k)?, V::from_value(v)?)))
            .collect()
    }
}

impl<T> FieldValue for BTreeSet<T>
where
    T: FieldValue + Ord,
{
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        items.iter().map(T::from_value).collect()
    }
}

///
/// TESTS
///
