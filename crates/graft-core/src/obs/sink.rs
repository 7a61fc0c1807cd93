//! Event sink boundary.
//!
//! Mapper and preload logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through GraftEvent and EventSink.
use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    obs::metrics::{self, EventReport},
};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn EventSink>> = const { RefCell::new(None) };
}

///
/// GraftEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraftEvent {
    MapFinish {
        source_path: &'static str,
        target_path: &'static str,
        records: u64,
    },
    PreloadStart {
        owner_path: &'static str,
        records: u64,
    },
    PreloadBatch {
        owner_path: &'static str,
        field: &'static str,
        keys: u64,
        skipped_zero: u64,
        skipped_populated: u64,
    },
    PreloadFinish {
        owner_path: &'static str,
        field: &'static str,
        fetched: u64,
        applied: u64,
        unmatched: u64,
    },
    Failure {
        class: ErrorClass,
        origin: ErrorOrigin,
    },
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: GraftEvent);
}

///
/// GlobalEventSink
/// Default thread-local sink that writes into the event counters.
/// Acts as the concrete sink when no scoped override is installed.
///

pub(crate) struct GlobalEventSink;

impl EventSink for GlobalEventSink {
    fn record(&self, event: GraftEvent) {
        match event {
            GraftEvent::MapFinish {
                target_path,
                records,
                ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.map_calls = m.ops.map_calls.saturating_add(1);
                    m.ops.records_mapped = m.ops.records_mapped.saturating_add(records);

                    let entry = m.records.entry(target_path.to_string()).or_default();
                    entry.map_calls = entry.map_calls.saturating_add(1);
                    entry.records_mapped = entry.records_mapped.saturating_add(records);
                });
            }

            GraftEvent::PreloadStart { owner_path, .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.preload_calls = m.ops.preload_calls.saturating_add(1);

                    let entry = m.records.entry(owner_path.to_string()).or_default();
                    entry.preload_calls = entry.preload_calls.saturating_add(1);
                });
            }

            GraftEvent::PreloadBatch {
                owner_path,
                keys,
                skipped_zero,
                skipped_populated,
                ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.keys_batched = m.ops.keys_batched.saturating_add(keys);
                    m.ops.skipped_zero_keys = m.ops.skipped_zero_keys.saturating_add(skipped_zero);
                    m.ops.skipped_populated =
                        m.ops.skipped_populated.saturating_add(skipped_populated);

                    let entry = m.records.entry(owner_path.to_string()).or_default();
                    entry.keys_batched = entry.keys_batched.saturating_add(keys);
                });
            }

            GraftEvent::PreloadFinish {
                owner_path,
                fetched,
                applied,
                unmatched,
                ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.records_fetched = m.ops.records_fetched.saturating_add(fetched);
                    m.ops.associations_applied =
                        m.ops.associations_applied.saturating_add(applied);
                    m.ops.unmatched_keys = m.ops.unmatched_keys.saturating_add(unmatched);

                    let entry = m.records.entry(owner_path.to_string()).or_default();
                    entry.associations_applied =
                        entry.associations_applied.saturating_add(applied);
                });
            }

            GraftEvent::Failure { class, .. } => {
                metrics::with_state_mut(|m| {
                    let counter = match class {
                        ErrorClass::Shape => &mut m.ops.shape_errors,
                        ErrorClass::Schema => &mut m.ops.schema_errors,
                        ErrorClass::Configuration => &mut m.ops.configuration_errors,
                        ErrorClass::Incompatible => &mut m.ops.incompatible_errors,
                    };
                    *counter = counter.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_EVENT_SINK: GlobalEventSink = GlobalEventSink;

pub(crate) fn record(event: GraftEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a valid `&dyn EventSink` in `with_event_sink`.
        // - `with_event_sink` restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        // Only a shared reference is materialized, matching the borrow used to
        // install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_EVENT_SINK.record(event);
    }
}

/// Record a failure event for an error about to be returned.
pub(crate) fn record_failure(err: &InternalError) {
    record(GraftEvent::Failure {
        class: err.class,
        origin: err.origin,
    });
}

/// Snapshot the current event counters.
#[must_use]
pub fn event_report() -> EventReport {
    metrics::report()
}

/// Reset all event counters on this thread.
pub fn event_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary event sink override.
///
/// Events emitted on this thread while `f` runs go to `sink` instead of the
/// global counters.
pub fn with_event_sink<T>(sink: &dyn EventSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn EventSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn EventSink, *const dyn EventSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink_ptr));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct CaptureSink {
        events: RefCell<Vec<GraftEvent>>,
    }

    impl EventSink for CaptureSink {
        fn record(&self, event: GraftEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    fn map_event(records: u64) -> GraftEvent {
        GraftEvent::MapFinish {
            source_path: "tests::Source",
            target_path: "tests::Dest",
            records,
        }
    }

    #[test]
    fn override_captures_events_instead_of_counters() {
        event_reset_all();
        let sink = CaptureSink::default();

        with_event_sink(&sink, || record(map_event(3)));

        assert_eq!(sink.events.borrow().as_slice(), &[map_event(3)]);
        assert_eq!(event_report().ops.map_calls, 0);
    }

    #[test]
    fn override_is_restored_after_scope() {
        event_reset_all();
        let sink = CaptureSink::default();

        with_event_sink(&sink, || {});
        record(map_event(2));

        assert!(sink.events.borrow().is_empty());
        let report = event_report();
        assert_eq!(report.ops.map_calls, 1);
        assert_eq!(report.ops.records_mapped, 2);
        assert_eq!(report.records["tests::Dest"].records_mapped, 2);
    }

    #[test]
    fn failures_count_by_class() {
        event_reset_all();

        record(GraftEvent::Failure {
            class: ErrorClass::Configuration,
            origin: ErrorOrigin::Preload,
        });

        let ops = event_report().ops;
        assert_eq!(ops.configuration_errors, 1);
        assert_eq!(ops.schema_errors, 0);
    }
}
