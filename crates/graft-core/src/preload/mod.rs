//! Association preload.
//!
//! Resolves one association field across a set of owning records with a
//! single batched fetch: collect distinct non-zero foreign keys, hand them
//! to the caller's finder once, index the results by primary key, and
//! write each match into its owner's empty association slot.
mod filter;
mod finder;
mod slot;
mod tag;


pub use filter::Filter;
pub use finder::Finder;
pub use tag::{FOREIGN_KEY, PRIMARY_KEY, PreloadTag, TagError, tag_entry};

use crate::{
    config::{GraftConfig, PreloadConfig},
    error::{ErrorOrigin, InternalError},
    extract,
    introspect::RecordSet,
    model::FieldModel,
    obs::sink::{self, GraftEvent},
    traits::Record,
    value::Value,
};
use serde::Serialize;
use slot::{Fetched, SlotKind};
use std::collections::BTreeSet;

///
/// PreloadReport
/// Outcome counts of one preload call.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PreloadReport {
    /// Records in the input set.
    pub records: usize,
    /// Records whose association was looked up.
    pub eligible: usize,
    /// Records skipped because their foreign key was zero.
    pub skipped_zero: usize,
    /// Records skipped because their association was already set.
    pub skipped_populated: usize,
    /// Distinct keys sent to the finder.
    pub keys: usize,
    /// Records returned by the finder.
    pub fetched: usize,
    /// Associations written.
    pub applied: usize,
    /// Eligible records whose key matched no fetched record.
    pub unmatched: usize,
}

///
/// Preload
///
/// Builder for one association preload over caller-owned records.
/// Join keys default to the association field's tag; explicit names
/// take precedence per key.
///

pub struct Preload<'a, R: Record, F> {
    records: RecordSet<'a, R>,
    finder: F,
    foreign_key: Option<String>,
    primary_key: Option<String>,
    config: PreloadConfig,
}

impl<'a, R: Record, F> Preload<'a, R, F> {
    pub fn new(records: RecordSet<'a, R>, finder: F) -> Self {
        Self {
            records,
            finder,
            foreign_key: None,
            primary_key: None,
            config: PreloadConfig::default(),
        }
    }

    /// Owner field whose value is looked up.
    #[must_use]
    pub fn foreign_key(mut self, name: impl Into<String>) -> Self {
        self.foreign_key = Some(name.into());
        self
    }

    /// Target field matched against the foreign key.
    #[must_use]
    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = Some(name.into());
        self
    }

    #[must_use]
    pub fn config(mut self, config: &GraftConfig) -> Self {
        self.config = config.preload.clone();
        self
    }

    /// Resolve association `field`, whose target record type is `T`.
    ///
    /// Validation failures abort before the finder runs. A missing match
    /// leaves the association untouched.
    pub fn preload<T>(self, field: &str) -> Result<PreloadReport, InternalError>
    where
        T: Record + Clone,
        F: Finder<T>,
    {
        self.run::<T>(field).inspect_err(sink::record_failure)
    }

    fn run<T>(self, field: &str) -> Result<PreloadReport, InternalError>
    where
        T: Record + Clone,
        F: Finder<T>,
    {
        let Self {
            records,
            mut finder,
            foreign_key,
            primary_key,
            config,
        } = self;

        let owner = R::MODEL;
        let mut handles = records.into_handles();
        let mut report = PreloadReport {
            records: handles.len(),
            ..PreloadReport::default()
        };

        if handles.is_empty() {
            return Ok(report);
        }

        // resolve and validate the association before touching any record
        let field_index = owner.require_field(field, ErrorOrigin::Preload)?;
        let field_model = &owner.fields[field_index];
        let (foreign_key, primary_key) =
            join_keys(field_model, foreign_key, primary_key, &config)?;
        let fk_index = owner.require_field(&foreign_key, ErrorOrigin::Preload)?;
        let pk_index = T::MODEL.require_field(&primary_key, ErrorOrigin::Preload)?;
        let kind = association_slot::<R, T>(field_model, handles[0].field_ref(field_index))?;

        sink::record(GraftEvent::PreloadStart {
            owner_path: R::PATH,
            records: report.records as u64,
        });

        // collect distinct non-zero keys from records with an empty slot
        let mut keys = Vec::new();
        let mut seen = BTreeSet::new();
        let mut pending = Vec::new();

        for (pos, record) in handles.iter().enumerate() {
            let key = record.get_value(fk_index).unwrap_or(Value::Null).into_key();
            if key.is_zero() {
                report.skipped_zero += 1;
                continue;
            }

            let populated = record
                .field_ref(field_index)
                .is_some_and(|slot| kind.is_populated::<T>(slot));
            if populated {
                report.skipped_populated += 1;
                continue;
            }

            if seen.insert(key.clone()) {
                keys.push(key.clone());
            }
            pending.push((pos, key));
        }

        report.eligible = pending.len();
        report.keys = keys.len();

        sink::record(GraftEvent::PreloadBatch {
            owner_path: R::PATH,
            field: field_model.name,
            keys: report.keys as u64,
            skipped_zero: report.skipped_zero as u64,
            skipped_populated: report.skipped_populated as u64,
        });

        if pending.is_empty() {
            finish::<R>(field_model, &report);
            return Ok(report);
        }

        // one fetch for the whole batch
        let filter = Filter::new(column_name::<T>(pk_index, &config), keys);
        let mut out = Vec::new();
        finder.find(&mut out, &filter);

        let mut fetched = Fetched::new(out);
        let index = extract::index_positions(fetched.records(), &primary_key)?;
        report.fetched = fetched.records().len();

        for (pos, key) in pending {
            let applied = index.get(&key).is_some_and(|&target| {
                handles[pos]
                    .field_mut(field_index)
                    .is_some_and(|slot| fetched.assign(kind, slot, target))
            });

            if applied {
                report.applied += 1;
            } else {
                report.unmatched += 1;
            }
        }

        finish::<R>(field_model, &report);

        Ok(report)
    }
}

// Explicit names win; the tag is only consulted when one is missing.
fn join_keys(
    field: &FieldModel,
    foreign_key: Option<String>,
    primary_key: Option<String>,
    config: &PreloadConfig,
) -> Result<(String, String), InternalError> {
    if let (Some(fk), Some(pk)) = (&foreign_key, &primary_key) {
        return Ok((fk.clone(), pk.clone()));
    }

    let raw = field.tag(&config.tag).ok_or_else(|| TagError::Missing {
        field: field.name.to_string(),
        tag: config.tag.clone(),
    })?;
    let tag = PreloadTag::parse(field.name, raw)?;

    Ok((
        foreign_key.unwrap_or(tag.foreign_key),
        primary_key.unwrap_or(tag.primary_key),
    ))
}

// External column of the target's primary key.
fn column_name<T: Record>(pk_index: usize, config: &PreloadConfig) -> String {
    let field = &T::MODEL.fields[pk_index];

    field
        .tag(&config.column_tag)
        .map_or_else(|| config.column_case.apply(field.name), str::to_string)
}

// The association must hold `T` behind a supported optional layer.
fn association_slot<R: Record, T: Record>(
    field: &FieldModel,
    probe: Option<&dyn std::any::Any>,
) -> Result<SlotKind, InternalError> {
    match field.target() {
        Some(target) if target.same_as(T::MODEL) => {}
        Some(target) => {
            return Err(InternalError::schema(
                ErrorOrigin::Preload,
                format!(
                    "field '{}' of {} holds {}, not {}",
                    field.name,
                    R::PATH,
                    target.path,
                    T::PATH
                ),
            ));
        }
        None => {
            return Err(InternalError::schema(
                ErrorOrigin::Preload,
                format!("field '{}' of {} does not hold a record", field.name, R::PATH),
            ));
        }
    }

    probe.and_then(SlotKind::probe::<T>).ok_or_else(|| {
        InternalError::schema(
            ErrorOrigin::Preload,
            format!(
                "field '{}' of {} must be Option<T>, Option<Box<T>>, Option<Rc<T>> or Option<Arc<T>> with T = {}",
                field.name,
                R::PATH,
                T::MODEL.name
            ),
        )
    })
}

fn finish<R: Record>(field: &FieldModel, report: &PreloadReport) {
    sink::record(GraftEvent::PreloadFinish {
        owner_path: R::PATH,
        field: field.name,
        fetched: report.fetched as u64,
        applied: report.applied as u64,
        unmatched: report.unmatched as u64,
    });
}
