//! Association slots.
//!
//! An association field holds its target behind one optional layer:
//! `Option<T>`, `Option<Box<T>>`, `Option<Rc<T>>` or `Option<Arc<T>>`.
//! Fields are reached as `dyn Any` and downcast to the concrete form.
use std::{any::Any, rc::Rc, sync::Arc};

///
/// SlotKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SlotKind {
    Inline,
    Boxed,
    Rc,
    Arc,
}

impl SlotKind {
    /// Classify a field holding `T`, or `None` if its type is not a
    /// supported association form.
    pub(crate) fn probe<T: 'static>(field: &dyn Any) -> Option<Self> {
        if field.is::<Option<T>>() {
            Some(Self::Inline)
        } else if field.is::<Option<Box<T>>>() {
            Some(Self::Boxed)
        } else if field.is::<Option<Rc<T>>>() {
            Some(Self::Rc)
        } else if field.is::<Option<Arc<T>>>() {
            Some(Self::Arc)
        } else {
            None
        }
    }

    pub(crate) fn is_populated<T: 'static>(self, field: &dyn Any) -> bool {
        match self {
            Self::Inline => field.downcast_ref::<Option<T>>().is_some_and(Option::is_some),
            Self::Boxed => field
                .downcast_ref::<Option<Box<T>>>()
                .is_some_and(Option::is_some),
            Self::Rc => field
                .downcast_ref::<Option<Rc<T>>>()
                .is_some_and(Option::is_some),
            Self::Arc => field
                .downcast_ref::<Option<Arc<T>>>()
                .is_some_and(Option::is_some),
        }
    }
}

///
/// Fetched
///
/// Records returned by a finder. Shared slots receive one `Rc`/`Arc`
/// per fetched record, created on first use.
///

pub(crate) struct Fetched<T> {
    records: Vec<T>,
    rc: Vec<Option<Rc<T>>>,
    arc: Vec<Option<Arc<T>>>,
}

impl<T: Clone + 'static> Fetched<T> {
    pub(crate) fn new(records: Vec<T>) -> Self {
        let len = records.len();

        Self {
            records,
            rc: vec![None; len],
            arc: vec![None; len],
        }
    }

    pub(crate) fn records(&self) -> &[T] {
        &self.records
    }

    /// Write fetched record `pos` into `field`.
    /// Returns false when `field` is not of `kind`.
    pub(crate) fn assign(&mut self, kind: SlotKind, field: &mut dyn Any, pos: usize) -> bool {
        let Some(record) = self.records.get(pos) else {
            return false;
        };

        match kind {
            SlotKind::Inline => {
                let Some(slot) = field.downcast_mut::<Option<T>>() else {
                    return false;
                };
                *slot = Some(record.clone());
            }
            SlotKind::Boxed => {
                let Some(slot) = field.downcast_mut::<Option<Box<T>>>() else {
                    return false;
                };
                *slot = Some(Box::new(record.clone()));
            }
            SlotKind::Rc => {
                let Some(slot) = field.downcast_mut::<Option<Rc<T>>>() else {
                    return false;
                };
                let shared = self.rc[pos].get_or_insert_with(|| Rc::new(record.clone()));
                *slot = Some(Rc::clone(shared));
            }
            SlotKind::Arc => {
                let Some(slot) = field.downcast_mut::<Option<Arc<T>>>() else {
                    return false;
                };
                let shared = self.arc[pos].get_or_insert_with(|| Arc::new(record.clone()));
                *slot = Some(Arc::clone(shared));
            }
        }

        true
    }
}

///
/// TESTS
///
