//! ## Crate layout
//! - `config`: TOML-backed runtime configuration.
//! - `error`: the shared structured error type.
//! - `extract`: per-field extraction across record sequences.
//! - `introspect`: input shapes (single record, sequence, keyed mapping).
//! - `map`: struct-to-struct and collection mapping by field name.
//! - `model`: static per-type record and field models.
//! - `obs`: event sink boundary and counters.
//! - `preload`: batched association resolution.
//! - `traits` / `types` / `value`: the record, field, and value vocabulary.
//!
//! `#[derive(Record)]` generates the model and accessors a type needs to
//! take part in mapping and preload.

pub use graft_core::{
    config, error, extract, introspect, map, model, obs, preload, traits, types, value,
};
pub use graft_derive::Record;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Public error alias.
pub type Error = error::InternalError;

///
/// Prelude
/// Domain vocabulary plus the `Record` derive, which shares its name
/// with the trait.
///

pub mod prelude {
    pub use crate::Record;
    pub use graft_core::prelude::*;
}
