//! Struct-to-struct mapping by field name.
//!
//! Destination fields pull from the source field whose name matches
//! case-insensitively. Nested records travel as `Value::Record` and are
//! rebuilt as fresh destination records, never aliased.
mod collection;


pub use collection::{Mapped, map_entries, map_sequence, map_value};

use crate::{
    error::{ErrorOrigin, InternalError},
    obs::sink::{self, GraftEvent},
    traits::Record,
};

/// Map one source record into a fresh destination record.
pub fn map_one<S, D>(source: &S) -> Result<D, InternalError>
where
    S: Record,
    D: Record,
{
    let mut out = D::default();
    map_fields(source, &mut out)?;

    sink::record(GraftEvent::MapFinish {
        source_path: S::PATH,
        target_path: D::PATH,
        records: 1,
    });

    Ok(out)
}

/// Map one source record into an existing destination record.
///
/// Destination fields with no same-name source field keep their value.
pub fn map_into<S, D>(source: &S, dest: &mut D) -> Result<(), InternalError>
where
    S: Record,
    D: Record,
{
    map_fields(source, dest)?;

    sink::record(GraftEvent::MapFinish {
        source_path: S::PATH,
        target_path: D::PATH,
        records: 1,
    });

    Ok(())
}

// Copy every destination field that has a case-insensitive source match.
pub(crate) fn map_fields<S, D>(source: &S, dest: &mut D) -> Result<(), InternalError>
where
    S: Record,
    D: Record,
{
    for (dest_index, field) in D::MODEL.fields.iter().enumerate() {
        let Some(source_index) = S::MODEL.field_index_ci(field.name) else {
            continue;
        };
        let Some(value) = source.get_value(source_index) else {
            continue;
        };

        dest.set_value(dest_index, &value).map_err(|err| {
            let err = err.into_internal(ErrorOrigin::Map, D::PATH, field.name, &value);
            sink::record_failure(&err);
            err
        })?;
    }

    Ok(())
}
