use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for mapper and preload calls.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) records: BTreeMap<String, RecordCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Mapper
    pub map_calls: u64,
    pub records_mapped: u64,

    // Preload
    pub preload_calls: u64,
    pub keys_batched: u64,
    pub skipped_zero_keys: u64,
    pub skipped_populated: u64,
    pub records_fetched: u64,
    pub associations_applied: u64,
    pub unmatched_keys: u64,

    // Failures by class
    pub shape_errors: u64,
    pub schema_errors: u64,
    pub configuration_errors: u64,
    pub incompatible_errors: u64,
}

///
/// RecordCounters
/// Per record path counters; keyed by the owning (preload) or
/// destination (mapper) record path.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RecordCounters {
    pub map_calls: u64,
    pub records_mapped: u64,
    pub preload_calls: u64,
    pub keys_batched: u64,
    pub associations_applied: u64,
}

///
/// EventReport
/// Point-in-time snapshot of the event counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub records: BTreeMap<String, RecordCounters>,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow counters immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Snapshot the current counters.
#[must_use]
pub(crate) fn report() -> EventReport {
    with_state(|m| EventReport {
        ops: m.ops.clone(),
        records: m.records.clone(),
    })
}
