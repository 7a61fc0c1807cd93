//! Field extraction across record sequences.
use crate::{
    error::{ErrorOrigin, InternalError},
    traits::{Record, RecordHandle},
    value::Value,
};
use std::collections::BTreeMap;

/// Values of one field across a sequence, in order.
///
/// Handles resolving to no record are skipped.
pub fn pluck<H>(items: &[H], field: &str) -> Result<Vec<Value>, InternalError>
where
    H: RecordHandle,
{
    let index = <H::Record as Record>::MODEL.require_field(field, ErrorOrigin::Model)?;

    Ok(items
        .iter()
        .filter_map(RecordHandle::record)
        .map(|record| record.get_value(index).unwrap_or(Value::Null))
        .collect())
}

/// Keyed view of a sequence by one field. When two records share a key
/// the later one wins.
///
/// Keys are in lookup-key form (see [`Value::into_key`]).
pub fn index_by<'a, H>(
    items: &'a [H],
    field: &str,
) -> Result<BTreeMap<Value, &'a H::Record>, InternalError>
where
    H: RecordHandle,
{
    let index = <H::Record as Record>::MODEL.require_field(field, ErrorOrigin::Model)?;

    Ok(items
        .iter()
        .filter_map(RecordHandle::record)
        .map(|record| (field_key(record, index), record))
        .collect())
}

/// Like [`index_by`] but over plain records, yielding positions into
/// `records`.
pub fn index_positions<R>(
    records: &[R],
    field: &str,
) -> Result<BTreeMap<Value, usize>, InternalError>
where
    R: Record,
{
    let index = R::MODEL.require_field(field, ErrorOrigin::Model)?;

    Ok(records
        .iter()
        .enumerate()
        .map(|(pos, record)| (field_key(record, index), pos))
        .collect())
}

fn field_key<R: Record>(record: &R, index: usize) -> Value {
    record.get_value(index).unwrap_or(Value::Null).into_key()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::Asset;

    fn asset(serial: &str, version: i64) -> Asset {
        Asset {
            serial_number: serial.to_string(),
            version,
            ..Asset::default()
        }
    }

    #[test]
    fn pluck_preserves_order_and_skips_empty_handles() {
        let items = vec![Some(asset("S2", 1)), None, Some(asset("S1", 2))];

        let serials = pluck(&items, "SerialNumber").expect("field exists");
        assert_eq!(serials, vec![Value::from("S2"), Value::from("S1")]);
    }

    #[test]
    fn pluck_unknown_field_is_schema_error() {
        let err = pluck(&[asset("S1", 1)], "serialnumber").expect_err("exact names only");

        assert!(err.is_schema());
    }

    #[test]
    fn index_by_last_write_wins() {
        let items = [asset("S1", 1), asset("S2", 2), asset("S1", 3)];

        let index = index_by(&items, "SerialNumber").expect("field exists");
        assert_eq!(index.len(), 2);
        assert_eq!(index[&Value::from("S1")].version, 3);

        let positions = index_positions(&items, "SerialNumber").expect("field exists");
        assert_eq!(positions[&Value::from("S1")], 2);
        assert_eq!(positions[&Value::from("S2")], 1);
    }

    #[test]
    fn signed_fields_index_under_unsigned_keys() {
        let items = [asset("S1", 7), asset("S2", -1)];

        let positions = index_positions(&items, "V").expect("field exists");
        assert_eq!(positions.get(&Value::Uint(7)), Some(&0));
        assert_eq!(positions.get(&Value::Int(-1)), Some(&1));
        assert_eq!(positions.get(&Value::Int(7)), None);
    }
}
