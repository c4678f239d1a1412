#![allow(dead_code)]

use sahay_core::escalation::{CrisisEvent, EventSeverity, ResolutionState};
use sahay_core::risk::{IndicatorCategory, TABLE_REVISION};
use sahay_infra::store::{EventRecord, record_from_event};

/// Test helper: a crisis event with a distinct identity per `(user, ts)`.
pub fn sample_event(user_id: &str, occurred_at_ms: u64) -> CrisisEvent {
    CrisisEvent {
        user_id: user_id.to_string(),
        occurred_at_ms,
        severity: EventSeverity::High,
        trigger_message: "i want to give up".to_string(),
        detected_categories: vec![
            IndicatorCategory::Hopelessness,
            IndicatorCategory::SelfHarm,
        ],
        table_revision: TABLE_REVISION,
        resolution: ResolutionState::Unresolved,
    }
}

/// Test helper: the persisted record for `sample_event`.
pub fn sample_record(user_id: &str, occurred_at_ms: u64) -> EventRecord {
    record_from_event(&sample_event(user_id, occurred_at_ms))
}
