//! Persistent stores: the crisis-event log and per-session level windows.

pub mod event_log;
pub mod session_window;

pub use event_log::{
    AppendError, CrisisEventLog, EventLogMetrics, EventRecord, ReplayOutcome, TransitionError,
    record_from_event,
};
pub use session_window::{SessionRegistryError, SessionWindowMetrics, SessionWindowRegistry};
