//! Event key determinism and identity-field sensitivity.

use sahay_core::escalation::{CrisisEvent, EventSeverity, ResolutionState};
use sahay_core::idempotency::{compute_event_key, format_event_key};
use sahay_core::risk::{IndicatorCategory, TABLE_REVISION};

fn sample_event() -> CrisisEvent {
    CrisisEvent {
        user_id: "user-7".to_string(),
        occurred_at_ms: 1_700_000_000_000,
        severity: EventSeverity::High,
        trigger_message: "i want to give up".to_string(),
        detected_categories: vec![IndicatorCategory::SelfHarm],
        table_revision: TABLE_REVISION,
        resolution: ResolutionState::Unresolved,
    }
}

#[test]
fn test_key_is_deterministic() {
    let event = sample_event();
    assert_eq!(compute_event_key(&event), compute_event_key(&event));
    assert_eq!(compute_event_key(&event), compute_event_key(&sample_event()));
}

#[test]
fn test_key_changes_with_each_identity_field() {
    let base = compute_event_key(&sample_event());

    let mut event = sample_event();
    event.user_id = "user-8".to_string();
    assert_ne!(compute_event_key(&event), base);

    let mut event = sample_event();
    event.occurred_at_ms += 1;
    assert_ne!(compute_event_key(&event), base);

    let mut event = sample_event();
    event.severity = EventSeverity::Severe;
    assert_ne!(compute_event_key(&event), base);

    let mut event = sample_event();
    event.trigger_message.push('!');
    assert_ne!(compute_event_key(&event), base);
}

#[test]
fn test_key_ignores_mutable_fields() {
    // Resolution and category set may change after recording; the key
    // must not.
    let base = compute_event_key(&sample_event());

    let mut event = sample_event();
    event.resolution = ResolutionState::Resolved;
    event.detected_categories = vec![
        IndicatorCategory::Hopelessness,
        IndicatorCategory::Isolation,
    ];
    assert_eq!(compute_event_key(&event), base);
}

#[test]
fn test_formatted_key_is_sixteen_hex_digits() {
    let formatted = format_event_key(compute_event_key(&sample_event()));
    assert_eq!(formatted.len(), 16);
    assert!(formatted.chars().all(|c| c.is_ascii_hexdigit()));

    assert_eq!(format_event_key(0), "0000000000000000");
}

#[test]
fn test_field_boundaries_are_unambiguous() {
    // Moving a character across the user_id/message boundary must change
    // the key.
    let mut a = sample_event();
    a.user_id = "ab".to_string();
    a.trigger_message = "c".to_string();

    let mut b = sample_event();
    b.user_id = "a".to_string();
    b.trigger_message = "bc".to_string();

    assert_ne!(compute_event_key(&a), compute_event_key(&b));
}
