//! Core runtime for Graft: record models, values, the struct/collection
//! mapper, and the association preload resolver.
#![warn(unreachable_pub)]

// derive output refers to `::graft`; let it resolve inside this crate too
extern crate self as graft;

// public exports are one module level down
pub mod config;
pub mod error;
pub mod extract;
pub mod introspect;
pub mod map;
pub mod model;
pub mod obs;
pub mod preload;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or config loaders are re-exported here.
///

pub mod prelude {
    pub use crate::{
        introspect::RecordSet,
        map::{Mapped, map_entries, map_into, map_one, map_sequence, map_value},
        model::{FieldModel, FieldTag, RecordModel},
        preload::{Filter, Finder, Preload, PreloadReport},
        traits::{FieldValue, Path, Record, RecordHandle},
        value::Value,
    };
}
