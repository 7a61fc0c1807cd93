use thiserror::Error as ThisError;

/// Tag entry naming the owner's join field.
pub const FOREIGN_KEY: &str = "foreignkey";

/// Tag entry naming the target's join field.
pub const PRIMARY_KEY: &str = "primarykey";

///
/// TagError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TagError {
    #[error("field '{field}' needs a '{tag}' tag declaring its foreignkey and primarykey")]
    Missing { field: String, tag: String },

    #[error(
        "the association tag on field '{field}' has no '{key}' entry; \
         expected 'foreignkey:<Field>;primarykey:<Field>'"
    )]
    MissingKey { field: String, key: String },

    #[error("the '{key}' entry of the association tag on field '{field}' is empty")]
    EmptyValue { field: String, key: String },
}

///
/// PreloadTag
///
/// Join keys declared by an association tag such as
/// `foreignkey:AssetSn;primarykey:SerialNumber`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PreloadTag {
    pub foreign_key: String,
    pub primary_key: String,
}

impl PreloadTag {
    /// Parse the raw tag of association field `field`.
    /// Both entries are required and must be non-empty.
    pub fn parse(field: &str, raw: &str) -> Result<Self, TagError> {
        Ok(Self {
            foreign_key: required_entry(field, raw, FOREIGN_KEY)?,
            primary_key: required_entry(field, raw, PRIMARY_KEY)?,
        })
    }
}

/// Value of the first `key:value` segment whose key is `key`.
///
/// Segments are separated by `;`. Segments and values are trimmed.
/// A present entry with nothing after the colon yields `Some("")`.
#[must_use]
pub fn tag_entry<'a>(raw: &'a str, key: &str) -> Option<&'a str> {
    raw.split(';').find_map(|segment| {
        let (name, value) = segment.trim().split_once(':')?;
        (name.trim() == key).then(|| value.trim())
    })
}

fn required_entry(field: &str, raw: &str, key: &str) -> Result<String, TagError> {
    match tag_entry(raw, key) {
        None => Err(TagError::MissingKey {
            field: field.to_string(),
            key: key.to_string(),
        }),
        Some("") => Err(TagError::EmptyValue {
            field: field.to_string(),
            key: key.to_string(),
        }),
        Some(value) => Ok(value.to_string()),
    }
}

///
/// TESTS
///
