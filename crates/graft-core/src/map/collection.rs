use crate::{
    error::{ErrorOrigin, InternalError},
    introspect::Shape,
    map::map_fields,
    obs::sink::{self, GraftEvent},
    traits::{Path, Record, RecordHandle},
    value::Value,
};

///
/// Mapped
///
/// Output of a dynamic mapping, mirroring the shape of the input.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Mapped<D> {
    One(D),
    Many(Vec<D>),
    Keyed(Vec<(Value, D)>),
}

impl<D> Mapped<D> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
            Self::Keyed(entries) => entries.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn into_one(self) -> Option<D> {
        match self {
            Self::One(item) => Some(item),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_many(self) -> Option<Vec<D>> {
        match self {
            Self::Many(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_keyed(self) -> Option<Vec<(Value, D)>> {
        match self {
            Self::Keyed(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Map a sequence of source handles, preserving order and cardinality.
///
/// A handle that resolves to no record is a shape error.
pub fn map_sequence<H, D>(source: &[H]) -> Result<Vec<D>, InternalError>
where
    H: RecordHandle,
    D: Record,
{
    let source_path = <H::Record as Path>::PATH;
    let mut out = Vec::with_capacity(source.len());

    for (index, handle) in source.iter().enumerate() {
        let record = handle.record().ok_or_else(|| {
            InternalError::shape(
                ErrorOrigin::Map,
                format!("sequence item {index} of {source_path} resolves to no record"),
            )
        });
        let record = record.inspect_err(sink::record_failure)?;

        let mut item = D::default();
        map_fields(record, &mut item)?;
        out.push(item);
    }

    sink::record(GraftEvent::MapFinish {
        source_path,
        target_path: D::PATH,
        records: out.len() as u64,
    });

    Ok(out)
}

/// Map the values of a keyed mapping into a new mapping with identical keys.
///
/// The output container is chosen by the caller (`BTreeMap`, `HashMap`, ...).
pub fn map_entries<'a, K, H, D, M>(
    source: impl IntoIterator<Item = (&'a K, &'a H)>,
) -> Result<M, InternalError>
where
    K: Clone + 'a,
    H: RecordHandle + 'a,
    D: Record,
    M: FromIterator<(K, D)>,
{
    let source_path = <H::Record as Path>::PATH;
    let mut entries = Vec::new();

    for (key, handle) in source {
        let record = handle.record().ok_or_else(|| {
            InternalError::shape(
                ErrorOrigin::Map,
                format!("mapping entry of {source_path} resolves to no record"),
            )
        });
        let record = record.inspect_err(sink::record_failure)?;

        let mut item = D::default();
        map_fields(record, &mut item)?;
        entries.push((key.clone(), item));
    }

    sink::record(GraftEvent::MapFinish {
        source_path,
        target_path: D::PATH,
        records: entries.len() as u64,
    });

    Ok(entries.into_iter().collect())
}

/// Map a dynamic value shaped as a record, a list of records, or a map of
/// records. Any other shape is rejected.
pub fn map_value<D>(value: &Value) -> Result<Mapped<D>, InternalError>
where
    D: Record,
{
    let shape = Shape::of(value).inspect_err(sink::record_failure)?;

    let mapped = map_shape(shape).inspect_err(sink::record_failure)?;

    sink::record(GraftEvent::MapFinish {
        source_path: "dynamic",
        target_path: D::PATH,
        records: mapped.len() as u64,
    });

    Ok(mapped)
}

fn map_shape<D: Record>(shape: Shape<'_>) -> Result<Mapped<D>, InternalError> {
    Ok(match shape {
        Shape::Single(record) => Mapped::One(D::from_record_value(record)?),
        Shape::Sequence(records) => Mapped::Many(
            records
                .into_iter()
                .map(D::from_record_value)
                .collect::<Result<_, _>>()?,
        ),
        Shape::Mapping(entries) => Mapped::Keyed(
            entries
                .into_iter()
                .map(|(key, record)| Ok((key.clone(), D::from_record_value(record)?)))
                .collect::<Result<_, InternalError>>()?,
        ),
    })
}
