//! Handler end-to-end scenarios: escalation with logging, sustained
//! trends across a session, idempotent retries, and non-blocking write
//! failure.

use sahay_core::escalation::{EscalationPolicy, EscalationTrigger};
use sahay_core::risk::{RiskAssessor, RiskLevel};
use sahay_infra::handler::{ChatTurnHandler, HandlerMetrics};
use sahay_infra::resources::HelplineDirectory;
use sahay_infra::store::{CrisisEventLog, SessionWindowRegistry};

fn handler_with_capacity(event_capacity: usize) -> ChatTurnHandler {
    ChatTurnHandler::new(
        RiskAssessor::new(),
        EscalationPolicy::with_defaults(),
        CrisisEventLog::new(event_capacity),
        SessionWindowRegistry::new(5, 16),
        HelplineDirectory::with_defaults(),
    )
}

#[test]
fn test_severe_message_logs_and_shows_helplines() {
    let mut handler = handler_with_capacity(16);
    let mut metrics = HandlerMetrics::new();

    let report = handler.handle_message(
        "user-1",
        "session-1",
        "I feel hopeless and want to give up",
        1_000,
        &mut metrics,
    );

    assert_eq!(report.assessment.level, RiskLevel::Severe);
    assert!(report.show_resources);
    assert!(!report.helplines.is_empty());
    assert!(!report.log_write_failed);

    let key = report.event_key.expect("severe must log");
    let stored = handler.event_log().get(&key).expect("event recorded");
    assert_eq!(stored.user_id, "user-1");
    assert_eq!(stored.severity, "severe");
    assert_eq!(metrics.event_log.appends_total(), 1);
}

#[test]
fn test_benign_message_changes_nothing() {
    let mut handler = handler_with_capacity(16);
    let mut metrics = HandlerMetrics::new();

    let report = handler.handle_message(
        "user-1",
        "session-1",
        "just a normal day at work",
        1_000,
        &mut metrics,
    );

    assert_eq!(report.assessment.level, RiskLevel::None);
    assert!(!report.show_resources);
    assert!(report.helplines.is_empty());
    assert!(report.event_key.is_none());
    assert!(handler.event_log().is_empty());
}

#[test]
fn test_sustained_low_trend_across_session() {
    let mut handler = handler_with_capacity(16);
    let mut metrics = HandlerMetrics::new();

    // "akela" scores low. The first two messages stand alone; the third
    // completes the run.
    let first = handler.handle_message("user-1", "session-1", "akela", 1_000, &mut metrics);
    assert!(!first.show_resources);

    let second = handler.handle_message("user-1", "session-1", "akela", 2_000, &mut metrics);
    assert!(!second.show_resources);

    let third = handler.handle_message("user-1", "session-1", "akela", 3_000, &mut metrics);
    assert!(third.show_resources);
    assert_eq!(third.trigger, EscalationTrigger::SustainedLowTrend);
    // Trend display never logs a low-level event.
    assert!(third.event_key.is_none());
    assert!(handler.event_log().is_empty());
}

#[test]
fn test_trend_is_per_session() {
    let mut handler = handler_with_capacity(16);
    let mut metrics = HandlerMetrics::new();

    handler.handle_message("user-1", "session-1", "akela", 1_000, &mut metrics);
    handler.handle_message("user-1", "session-1", "akela", 2_000, &mut metrics);
    // Same user, different session: no inherited run.
    let report = handler.handle_message("user-1", "session-2", "akela", 3_000, &mut metrics);
    assert!(!report.show_resources);
}

#[test]
fn test_retried_message_is_idempotent() {
    let mut handler = handler_with_capacity(16);
    let mut metrics = HandlerMetrics::new();

    let first = handler.handle_message(
        "user-1",
        "session-1",
        "I feel hopeless and want to give up",
        1_000,
        &mut metrics,
    );
    // Same user, same text, same timestamp: a delivery retry.
    let second = handler.handle_message(
        "user-1",
        "session-1",
        "I feel hopeless and want to give up",
        1_000,
        &mut metrics,
    );

    assert_eq!(first.event_key, second.event_key);
    assert!(!second.log_write_failed, "duplicate is not a failure");
    assert_eq!(handler.event_log().len(), 1);
    assert_eq!(metrics.event_log.duplicate_appends(), 1);
}

#[test]
fn test_log_write_failure_never_blocks_the_decision() {
    // Capacity zero makes every append fail.
    let mut handler = handler_with_capacity(0);
    let mut metrics = HandlerMetrics::new();

    let report = handler.handle_message(
        "user-1",
        "session-1",
        "I feel hopeless and want to give up",
        1_000,
        &mut metrics,
    );

    assert!(report.log_write_failed);
    assert!(report.event_key.is_none());
    // The user-facing escalation stands regardless.
    assert!(report.show_resources);
    assert!(!report.helplines.is_empty());
    assert_eq!(report.assessment.level, RiskLevel::Severe);
    assert_eq!(metrics.event_log.write_errors(), 1);
}

#[test]
fn test_session_windows_record_levels() {
    let mut handler = handler_with_capacity(16);
    let mut metrics = HandlerMetrics::new();

    handler.handle_message("user-1", "session-1", "akela", 1_000, &mut metrics);
    handler.handle_message("user-1", "session-1", "hello", 2_000, &mut metrics);

    assert_eq!(
        handler.sessions().recent_levels("session-1"),
        vec![RiskLevel::Low, RiskLevel::None]
    );
    assert_eq!(handler.session_metrics().pushes_total(), 2);
}
