//! Idempotency primitives: crisis-event key hashing.

pub mod event_key;

pub use event_key::{compute_event_key, format_event_key};
