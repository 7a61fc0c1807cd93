mod field_value;

pub use field_value::FieldValue;

use crate::{
    error::{ErrorOrigin, InternalError},
    model::RecordModel,
    value::{RecordValue, Value},
};
use std::any::Any;

// ============================================================================
// RECORD IDENTITY & SCHEMA
// ============================================================================
//
// These traits describe *what a record is*: where its type lives and which
// fields its generated model exposes.
//

///
/// Path
/// Fully-qualified type path.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// FieldSetError
///
/// Failure writing a value into a positional field.
/// Callers attach record/field context when surfacing it.
///

#[derive(Debug)]
pub enum FieldSetError {
    /// The position is not a field of the model.
    OutOfRange,
    /// The value cannot be represented by the field's type.
    Incompatible,
    /// A nested record could not be rebuilt; carries the inner failure.
    Nested(Box<InternalError>),
}

impl FieldSetError {
    /// Surface the failure against field `field` of record `path`.
    pub(crate) fn into_internal(
        self,
        origin: ErrorOrigin,
        path: &str,
        field: &str,
        value: &Value,
    ) -> InternalError {
        match self {
            Self::Nested(inner) => InternalError::nested(origin, path, field, *inner),
            Self::OutOfRange | Self::Incompatible => {
                InternalError::incompatible(origin, path, field, value.kind_label())
            }
        }
    }
}

///
/// Record
///
/// A structural value with a generated, ordered field registry.
/// Positions passed to the accessors are indexes into `MODEL.fields`.
///
/// Implemented by `#[derive(Record)]`.
///

pub trait Record: Path + Default + 'static {
    const MODEL: &'static RecordModel;

    /// Read one field as a dynamic value.
    fn get_value(&self, index: usize) -> Option<Value>;

    /// Overwrite one field from a dynamic value.
    fn set_value(&mut self, index: usize, value: &Value) -> Result<(), FieldSetError>;

    /// Borrow one field as `Any`, for typed access to association slots.
    fn field_ref(&self, index: usize) -> Option<&dyn Any>;

    /// Mutably borrow one field as `Any`.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Any>;

    /// Flatten the record into its model's named field values.
    fn to_record_value(&self) -> RecordValue {
        let fields = Self::MODEL
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name, self.get_value(index).unwrap_or(Value::Null)))
            .collect();

        RecordValue::new(Self::PATH, fields)
    }

    /// Build a fresh record from named values, matching field names
    /// case-insensitively. Fields missing from `value` keep their default.
    fn from_record_value(value: &RecordValue) -> Result<Self, InternalError> {
        let mut out = Self::default();

        for (index, field) in Self::MODEL.fields.iter().enumerate() {
            let Some(field_value) = value.get_ci(field.name) else {
                continue;
            };

            out.set_value(index, field_value).map_err(|err| {
                err.into_internal(ErrorOrigin::Map, Self::PATH, field.name, field_value)
            })?;
        }

        Ok(out)
    }
}

///
/// RecordHandle
///
/// A handle that resolves through zero or more indirections to a record.
/// `Box<H>` and `Option<H>` are handles whenever `H` is; a `None` layer
/// resolves to no record.
///

pub trait RecordHandle {
    type Record: Record;

    fn record(&self) -> Option<&Self::Record>;

    fn record_mut(&mut self) -> Option<&mut Self::Record>;
}

impl<H: RecordHandle> RecordHandle for Box<H> {
    type Record = H::Record;

    fn record(&self) -> Option<&Self::Record> {
        (**self).record()
    }

    fn record_mut(&mut self) -> Option<&mut Self::Record> {
        (**self).record_mut()
    }
}

impl<H: RecordHandle> RecordHandle for Option<H> {
    type Record = H::Record;

    fn record(&self) -> Option<&Self::Record> {
        self.as_ref().and_then(RecordHandle::record)
    }

    fn record_mut(&mut self) -> Option<&mut Self::Record> {
        self.as_mut().and_then(RecordHandle::record_mut)
    }
}
