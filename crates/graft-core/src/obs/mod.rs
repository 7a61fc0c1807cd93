//! Observability: runtime counters and sink abstractions.
//!
//! Mapper and preload code never touch the counters directly; they emit
//! `GraftEvent`s through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, RecordCounters};
pub use sink::{EventSink, GraftEvent, event_report, event_reset_all, with_event_sink};
