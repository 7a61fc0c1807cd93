use crate::{
    error::{ErrorOrigin, InternalError},
    model::FieldModel,
};

///
/// RecordModel
/// Minimal, macro-generated runtime model for one record type.
///

#[derive(Debug)]
pub struct RecordModel {
    /// Fully-qualified Rust type path (for dispatch and diagnostics).
    pub path: &'static str,
    /// Bare type name.
    pub name: &'static str,
    /// Ordered field list; positions are the field handles used by `Record`.
    pub fields: &'static [FieldModel],
}

impl RecordModel {
    /// Exact, case-sensitive field lookup.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Case-insensitive field lookup (both sides lowercased).
    ///
    /// When several fields fold to the same lowercase name the last
    /// declared one wins.
    #[must_use]
    pub fn field_index_ci(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();

        self.fields
            .iter()
            .rposition(|field| field.name.to_lowercase() == wanted)
    }

    /// Exact field lookup that raises a schema error when absent.
    pub fn require_field(&self, name: &str, origin: ErrorOrigin) -> Result<usize, InternalError> {
        self.field_index(name)
            .ok_or_else(|| InternalError::unknown_field(origin, self.path, name))
    }

    #[must_use]
    pub fn field(&self, index: usize) -> Option<&'static FieldModel> {
        self.fields.get(index)
    }

    /// Two models describe the same record type.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

///
/// TESTS
///
