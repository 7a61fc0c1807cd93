use crate::model::RecordModel;

///
/// FieldModel
/// Runtime field metadata used by the mapper and the preload resolver.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Field name as declared on the record (after any rename).
    pub name: &'static str,
    /// Metadata attached to the field.
    pub tags: &'static [FieldTag],
    /// Record model reached through this field's type, if the field holds
    /// a record directly or behind `Option`/`Box`/`Rc`/`Arc`.
    pub record: fn() -> Option<&'static RecordModel>,
}

impl FieldModel {
    /// Build a scalar field descriptor with no tags.
    #[must_use]
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            tags: &[],
            record: no_record,
        }
    }

    /// Raw value of the named tag.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value)
    }

    /// Record model of the association target, if any.
    #[must_use]
    pub fn target(&self) -> Option<&'static RecordModel> {
        (self.record)()
    }
}

///
/// FieldTag
///
/// One `key → value` metadata entry on a field, e.g.
/// `preload → "foreignkey:AssetSn;primarykey:SerialNumber"`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldTag {
    pub key: &'static str,
    pub value: &'static str,
}

impl FieldTag {
    #[must_use]
    pub const fn new(key: &'static str, value: &'static str) -> Self {
        Self { key, value }
    }
}

const fn no_record() -> Option<&'static RecordModel> {
    None
}
