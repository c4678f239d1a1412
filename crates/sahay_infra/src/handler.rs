//! Chat-turn orchestration: core evaluation plus store and resource
//! plumbing.
//!
//! The handler runs synchronously inside the chat turn, before the
//! companion's reply is rendered. The escalation decision is made first
//! and stands regardless of what happens to the event-log write: a
//! failed write is surfaced as a warning and a report flag, never as a
//! blocked response.

use sahay_core::escalation::{EscalationPolicy, EscalationTrigger};
use sahay_core::risk::{RiskAssessment, RiskAssessor};
use sahay_core::turn::{TurnInput, TurnMetrics, evaluate_chat_turn};

use crate::resources::{HelplineDirectory, HelplineEntry};
use crate::store::{
    AppendError, CrisisEventLog, EventLogMetrics, SessionWindowMetrics, SessionWindowRegistry,
    record_from_event,
};

// --- Report --------------------------------------------------------------

/// What the surrounding application needs from one handled message.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub assessment: RiskAssessment,
    pub trigger: EscalationTrigger,
    pub show_resources: bool,
    /// Helplines to display; empty when `show_resources` is false.
    pub helplines: &'static [HelplineEntry],
    /// Key of the logged event, when one was recorded (or was already
    /// recorded by an earlier retry of the same message).
    pub event_key: Option<String>,
    /// True when an event should have been logged but the write failed.
    /// The decision above still stands.
    pub log_write_failed: bool,
}

// --- Metrics -------------------------------------------------------------

/// Aggregated metrics for the handler.
#[derive(Debug, Default)]
pub struct HandlerMetrics {
    pub turn: TurnMetrics,
    pub event_log: EventLogMetrics,
}

impl HandlerMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

// --- Handler -------------------------------------------------------------

/// Per-message orchestration over the pure core and the infra stores.
#[derive(Debug)]
pub struct ChatTurnHandler {
    assessor: RiskAssessor,
    policy: EscalationPolicy,
    event_log: CrisisEventLog,
    sessions: SessionWindowRegistry,
    session_metrics: SessionWindowMetrics,
    directory: HelplineDirectory,
}

impl ChatTurnHandler {
    pub fn new(
        assessor: RiskAssessor,
        policy: EscalationPolicy,
        event_log: CrisisEventLog,
        sessions: SessionWindowRegistry,
        directory: HelplineDirectory,
    ) -> Self {
        Self {
            assessor,
            policy,
            event_log,
            sessions,
            session_metrics: SessionWindowMetrics::new(),
            directory,
        }
    }

    /// Handle one inbound message.
    ///
    /// Order matters: the history snapshot is taken before the current
    /// message's level is pushed, so the policy sees prior messages only.
    pub fn handle_message(
        &mut self,
        user_id: &str,
        session_id: &str,
        message: &str,
        now_ms: u64,
        metrics: &mut HandlerMetrics,
    ) -> TurnReport {
        let recent = self.sessions.recent_levels(session_id);
        let input = TurnInput {
            user_id,
            message,
            recent_levels: &recent,
            now_ms,
        };
        let outcome = evaluate_chat_turn(&self.assessor, &self.policy, &input, &mut metrics.turn);

        if let Err(err) =
            self.sessions
                .push_level(session_id, outcome.assessment.level, &self.session_metrics)
        {
            // History is advisory; the current decision is already made.
            tracing::warn!("session window update failed for {session_id}: {err}");
        }

        let mut event_key = None;
        let mut log_write_failed = false;
        if let Some(event) = &outcome.decision.event {
            let record = record_from_event(event);
            let key = record.event_key.clone();
            match self.event_log.append(record, &mut metrics.event_log) {
                Ok(()) => event_key = Some(key),
                Err(AppendError::DuplicateEvent { .. }) => {
                    tracing::debug!("crisis event already recorded: {key}");
                    event_key = Some(key);
                }
                Err(err) => {
                    tracing::warn!("crisis event log write failed: {err}");
                    log_write_failed = true;
                }
            }
        }

        let helplines: &'static [HelplineEntry] = if outcome.decision.show_resources {
            self.directory.entries_for_display()
        } else {
            &[]
        };

        TurnReport {
            assessment: outcome.assessment,
            trigger: outcome.decision.trigger,
            show_resources: outcome.decision.show_resources,
            helplines,
            event_key,
            log_write_failed,
        }
    }

    /// The underlying event log (for replay and follow-up queries).
    pub fn event_log(&self) -> &CrisisEventLog {
        &self.event_log
    }

    /// Mutable event log access (for resolution updates).
    pub fn event_log_mut(&mut self) -> &mut CrisisEventLog {
        &mut self.event_log
    }

    /// The session registry.
    pub fn sessions(&self) -> &SessionWindowRegistry {
        &self.sessions
    }

    /// Session registry metrics.
    pub fn session_metrics(&self) -> &SessionWindowMetrics {
        &self.session_metrics
    }
}
