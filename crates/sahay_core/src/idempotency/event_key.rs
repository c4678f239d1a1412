//! Event key computation for idempotent crisis-event writes.
//!
//! `event_key = xxhash64(user_id + occurred_at_ms + severity + trigger_message)`
//!
//! Every input comes from the event payload itself; the routine reads no
//! wall clock, so a retried write re-derives the same key and the event
//! log can treat the duplicate as a no-op. Resolution state and category
//! set are excluded: they may change after the event is recorded and
//! must not change its identity.

use xxhash_rust::xxh64::xxh64;

use crate::escalation::CrisisEvent;

/// Compute the idempotency key for a crisis event.
pub fn compute_event_key(event: &CrisisEvent) -> u64 {
    // Deterministic byte buffer over the canonical identity fields.
    // The 0xFF separator cannot appear in UTF-8 strings, which prevents
    // field-boundary ambiguity.
    let mut buf = Vec::with_capacity(128);

    buf.extend_from_slice(event.user_id.as_bytes());
    buf.push(0xFF);
    buf.extend_from_slice(&event.occurred_at_ms.to_le_bytes());
    buf.push(0xFF);
    buf.extend_from_slice(event.severity.as_str().as_bytes());
    buf.push(0xFF);
    buf.extend_from_slice(event.trigger_message.as_bytes());

    xxh64(&buf, 0)
}

/// Format an event key as a 16-hex-digit string.
pub fn format_event_key(key: u64) -> String {
    format!("{key:016x}")
}
