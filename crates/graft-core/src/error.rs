use crate::{config::ConfigError, preload::TagError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable classification.
/// Every fatal condition raised by the mapper and the preload resolver
/// surfaces as one of these; there is no recovery layer.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without a detail payload.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a shape error for an input that is not a record,
    /// a sequence of records, or a keyed mapping of records.
    pub(crate) fn shape(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Shape, origin, message)
    }

    /// Construct a schema error for a field missing from a record model.
    pub(crate) fn unknown_field(origin: ErrorOrigin, path: &str, field: &str) -> Self {
        Self::new(
            ErrorClass::Schema,
            origin,
            format!("there is no field named '{field}' in the record {path}"),
        )
    }

    /// Construct a schema error.
    pub(crate) fn schema(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Schema, origin, message)
    }

    /// Construct an incompatible-value error for one destination field.
    pub(crate) fn incompatible(
        origin: ErrorOrigin,
        path: &str,
        field: &str,
        value_kind: &str,
    ) -> Self {
        Self::new(
            ErrorClass::Incompatible,
            origin,
            format!("cannot write a {value_kind} value into field '{field}' of {path}"),
        )
    }

    /// Prefix a nested record's failure with the enclosing field.
    /// Class and detail are kept from `inner`.
    pub(crate) fn nested(origin: ErrorOrigin, path: &str, field: &str, inner: Self) -> Self {
        Self {
            class: inner.class,
            origin,
            message: format!("field '{field}' of {path}: {}", inner.message),
            detail: inner.detail,
        }
    }

    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.class, ErrorClass::Configuration)
    }

    #[must_use]
    pub const fn is_schema(&self) -> bool {
        matches!(self.class, ErrorClass::Schema)
    }

    #[must_use]
    pub const fn is_shape(&self) -> bool {
        matches!(self.class, ErrorClass::Shape)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Tag(TagError),
    #[error("{0}")]
    Config(ConfigError),
}

impl From<TagError> for InternalError {
    fn from(err: TagError) -> Self {
        Self {
            class: ErrorClass::Configuration,
            origin: ErrorOrigin::Preload,
            message: err.to_string(),
            detail: Some(ErrorDetail::Tag(err)),
        }
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self {
            class: ErrorClass::Configuration,
            origin: ErrorOrigin::Config,
            message: err.to_string(),
            detail: Some(ErrorDetail::Config(err)),
        }
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum ErrorClass {
    Shape,
    Schema,
    Configuration,
    Incompatible,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Shape => "shape",
            Self::Schema => "schema",
            Self::Configuration => "configuration",
            Self::Incompatible => "incompatible",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Config,
    Map,
    Model,
    Preload,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Map => "map",
            Self::Model => "model",
            Self::Preload => "preload",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_class_prefixes_origin_and_class() {
        let err = InternalError::unknown_field(ErrorOrigin::Preload, "app::Device", "Serial");

        assert!(err.is_schema());
        assert_eq!(
            err.display_with_class(),
            "preload:schema: there is no field named 'Serial' in the record app::Device"
        );
    }

    #[test]
    fn tag_error_converts_to_configuration_error() {
        let err: InternalError = TagError::Missing {
            field: "asset".to_string(),
            tag: "preload".to_string(),
        }
        .into();

        assert!(err.is_configuration());
        assert!(matches!(err.detail, Some(ErrorDetail::Tag(_))));
    }
}
