//! Input normalization.
//!
//! Classifies caller input once at the boundary into a closed set of shapes
//! (single record, record sequence, keyed record mapping) and flattens it into
//! record handles. Indirections resolve through `RecordHandle`.
use crate::{
    error::{ErrorOrigin, InternalError},
    model::RecordModel,
    traits::{Record, RecordHandle},
    value::{RecordValue, Value},
};
use std::collections::{BTreeMap, HashMap};

/// Shape error message naming the accepted inputs.
pub(crate) const ACCEPTED_SHAPES: &str =
    "input should be a record, a sequence of records, or a keyed mapping of records";

///
/// RecordSet
///
/// Mutable view over caller-owned records, classified by shape.
/// Handles that resolve to no record (a `None` layer) are dropped.
///

pub enum RecordSet<'a, R: Record> {
    Single(Option<&'a mut R>),
    Sequence(Vec<&'a mut R>),
    Mapping(Vec<&'a mut R>),
}

impl<'a, R: Record> RecordSet<'a, R> {
    /// One record behind any number of indirections.
    pub fn single<H>(handle: &'a mut H) -> Self
    where
        H: RecordHandle<Record = R>,
    {
        Self::Single(handle.record_mut())
    }

    /// A slice, `Vec`, or array of record handles.
    pub fn sequence<H>(items: &'a mut [H]) -> Self
    where
        H: RecordHandle<Record = R>,
    {
        Self::Sequence(items.iter_mut().filter_map(RecordHandle::record_mut).collect())
    }

    /// The values of any keyed mapping, in the mapping's iteration order.
    pub fn mapping<I, H>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a mut H>,
        H: RecordHandle<Record = R> + 'a,
    {
        Self::Mapping(
            values
                .into_iter()
                .filter_map(RecordHandle::record_mut)
                .collect(),
        )
    }

    /// The values of a `BTreeMap`.
    pub fn btree_map<K, H>(map: &'a mut BTreeMap<K, H>) -> Self
    where
        H: RecordHandle<Record = R> + 'a,
    {
        Self::mapping(map.values_mut())
    }

    /// The values of a `HashMap`.
    pub fn hash_map<K, H, S>(map: &'a mut HashMap<K, H, S>) -> Self
    where
        H: RecordHandle<Record = R> + 'a,
    {
        Self::mapping(map.values_mut())
    }

    /// Model of the underlying record type.
    #[must_use]
    pub const fn model(&self) -> &'static RecordModel {
        R::MODEL
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(record) => usize::from(record.is_some()),
            Self::Sequence(records) | Self::Mapping(records) => records.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into an ordered list of record handles.
    #[must_use]
    pub fn into_handles(self) -> Vec<&'a mut R> {
        match self {
            Self::Single(record) => record.into_iter().collect(),
            Self::Sequence(records) | Self::Mapping(records) => records,
        }
    }
}

///
/// Shape
///
/// Dynamic classification of a `Value` as a record input.
///

#[derive(Debug)]
pub enum Shape<'a> {
    Single(&'a RecordValue),
    Sequence(Vec<&'a RecordValue>),
    Mapping(Vec<(&'a Value, &'a RecordValue)>),
}

impl<'a> Shape<'a> {
    /// Classify a value, rejecting anything that is not a record,
    /// a list of records, or a map of records.
    pub fn of(value: &'a Value) -> Result<Self, InternalError> {
        match value {
            Value::Record(record) => Ok(Self::Single(record)),
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    item.as_record().ok_or_else(|| {
                        InternalError::shape(
                            ErrorOrigin::Map,
                            format!(
                                "{ACCEPTED_SHAPES}; list item {index} is a {}",
                                item.kind_label()
                            ),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Sequence),
            Value::Map(entries) => entries
                .iter()
                .map(|(key, item)| {
                    item.as_record().map(|record| (key, record)).ok_or_else(|| {
                        InternalError::shape(
                            ErrorOrigin::Map,
                            format!(
                                "{ACCEPTED_SHAPES}; map entry {key:?} holds a {}",
                                item.kind_label()
                            ),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Mapping),
            other => Err(InternalError::shape(
                ErrorOrigin::Map,
                format!("{ACCEPTED_SHAPES}; got a {}", other.kind_label()),
            )),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Sequence(records) => records.len(),
            Self::Mapping(entries) => entries.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{Asset, Device};

    fn device(serial: &str) -> Device {
        Device {
            asset_sn: serial.to_string(),
            ..Device::default()
        }
    }

    #[test]
    fn single_record_is_one_handle() {
        let mut record = device("S1");
        let set = RecordSet::single(&mut record);

        assert_eq!(set.len(), 1);
        assert_eq!(set.model().name, "Device");
        assert_eq!(set.into_handles().len(), 1);
    }

    #[test]
    fn indirections_resolve_and_none_is_dropped() {
        let mut records: Vec<Option<Box<Device>>> =
            vec![Some(Box::new(device("S1"))), None, Some(Box::new(device("S2")))];
        let handles = RecordSet::sequence(&mut records).into_handles();

        let serials: Vec<_> = handles.iter().map(|d| d.asset_sn.as_str()).collect();
        assert_eq!(serials, vec!["S1", "S2"]);
    }

    #[test]
    fn nested_single_none_is_empty() {
        let mut record: Option<Box<Device>> = None;

        assert!(RecordSet::single(&mut record).is_empty());
    }

    #[test]
    fn mapping_yields_every_value() {
        let mut map = BTreeMap::from([(1, device("A")), (2, device("B"))]);
        let set = RecordSet::btree_map(&mut map);

        assert!(matches!(set, RecordSet::Mapping(_)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn handles_write_through_to_caller() {
        let mut records = vec![device("S1")];
        for record in RecordSet::sequence(&mut records).into_handles() {
            record.asset_sn.push('!');
        }

        assert_eq!(records[0].asset_sn, "S1!");
    }

    #[test]
    fn shape_accepts_records_lists_and_maps() {
        let record = Value::Record(Asset::default().to_record_value());
        let list = Value::List(vec![record.clone(), record.clone()]);
        let map = Value::Map(vec![(Value::from("k"), record.clone())]);

        assert!(matches!(Shape::of(&record), Ok(Shape::Single(_))));
        assert_eq!(Shape::of(&list).map(|s| s.len()).ok(), Some(2));
        assert!(matches!(Shape::of(&map), Ok(Shape::Mapping(_))));
    }

    #[test]
    fn shape_rejects_scalars_and_mixed_lists() {
        let err = Shape::of(&Value::Int(3)).expect_err("scalar should be rejected");
        assert!(err.is_shape());
        assert!(err.message.contains(ACCEPTED_SHAPES));

        let mixed = Value::List(vec![Value::Text("x".into())]);
        assert!(Shape::of(&mixed).expect_err("mixed list").is_shape());
    }
}
