//! Runtime record models.
//!
//! A model is the static, per-type registry generated by `#[derive(Record)]`:
//! an ordered list of field descriptors with their tags. The mapper and the
//! preload resolver only ever discover fields through these models.
//!
//! In general:
//! - The derive defines *what exists*
//! - `model` defines *how it is found*
pub mod field;
pub mod record;

pub use field::{FieldModel, FieldTag};
pub use record::RecordModel;
