//! Escalation decision over an assessment plus recent session history.
//!
//! The policy holds no session state: the recent-level window is passed
//! in by the caller, so the policy stays a pure function over explicit
//! inputs and is testable with literal level sequences.

use crate::risk::{RiskAssessment, RiskLevel, TABLE_REVISION};

use super::event::{CrisisEvent, EventSeverity, ResolutionState, distinct_categories};

// --- Configuration -------------------------------------------------------

/// Policy tunables, resolved by the caller from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    /// How many trailing history entries are consulted.
    pub recent_window: usize,
    /// Run length of consecutive prior at-least-low levels after which
    /// persistence itself counts as a signal. Must be at least 1.
    pub sustained_low_run: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            recent_window: 5,
            sustained_low_run: 2,
        }
    }
}

// --- Decision ------------------------------------------------------------

/// Which rule fired for a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationTrigger {
    /// Neither rule fired.
    NotTriggered,
    /// The assessed level reached `Moderate` or above.
    SeverityThreshold,
    /// A sustained run of low-or-higher levels made persistence the signal.
    SustainedLowTrend,
}

/// Outcome of one escalation decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationDecision {
    /// Whether helpline resources are shown this turn.
    pub show_resources: bool,
    /// Whether a crisis event is persisted this turn.
    pub log_event: bool,
    pub trigger: EscalationTrigger,
    /// The constructed payload when `log_event` is true.
    pub event: Option<CrisisEvent>,
}

/// Caller-supplied context for one decision.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub user_id: &'a str,
    /// Verbatim text of the message being decided; recorded on logged
    /// events.
    pub message: &'a str,
    /// Levels from the same session's prior messages, most-recent-last.
    pub recent_levels: &'a [RiskLevel],
}

// --- Metrics -------------------------------------------------------------

/// Observability counters for escalation decisions.
#[derive(Debug, Default)]
pub struct EscalationMetrics {
    decisions_total: u64,
    resources_shown_total: u64,
    events_logged_total: u64,
    trend_triggered_total: u64,
}

impl EscalationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decisions_total(&self) -> u64 {
        self.decisions_total
    }

    pub fn resources_shown_total(&self) -> u64 {
        self.resources_shown_total
    }

    pub fn events_logged_total(&self) -> u64 {
        self.events_logged_total
    }

    /// Decisions where the sustained-trend rule fired.
    pub fn trend_triggered_total(&self) -> u64 {
        self.trend_triggered_total
    }

    fn record_decision(&mut self) {
        self.decisions_total += 1;
    }

    fn record_resources_shown(&mut self) {
        self.resources_shown_total += 1;
    }

    fn record_event_logged(&mut self) {
        self.events_logged_total += 1;
    }

    fn record_trend_triggered(&mut self) {
        self.trend_triggered_total += 1;
    }
}

// --- Policy --------------------------------------------------------------

/// Pure decision policy over an assessment and an explicit history window.
#[derive(Debug, Clone, Copy)]
pub struct EscalationPolicy {
    config: PolicyConfig,
}

impl EscalationPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(PolicyConfig::default())
    }

    pub fn config(&self) -> PolicyConfig {
        self.config
    }

    /// Decide resource display and event logging for one assessed message.
    ///
    /// Rules:
    /// - `show_resources` when `level >= Moderate`, or when the current
    ///   level is `>= Low` and the last `sustained_low_run` prior levels
    ///   are all `>= Low` (a single low message never escalates; a
    ///   sustained trend does).
    /// - `log_event` only when `level >= Moderate`. `None`/`Low` are
    ///   never logged individually, regardless of pattern.
    ///
    /// Only the most recent `recent_window` entries of the supplied
    /// history are consulted.
    pub fn decide(
        &self,
        ctx: &DecisionContext<'_>,
        assessment: &RiskAssessment,
        metrics: &mut EscalationMetrics,
    ) -> EscalationDecision {
        metrics.record_decision();

        let window = tail(ctx.recent_levels, self.config.recent_window);
        let level = assessment.level;

        let severity_triggered = level >= RiskLevel::Moderate;
        let trend_triggered = !severity_triggered
            && level >= RiskLevel::Low
            && has_sustained_run(window, self.config.sustained_low_run);

        let trigger = if severity_triggered {
            EscalationTrigger::SeverityThreshold
        } else if trend_triggered {
            EscalationTrigger::SustainedLowTrend
        } else {
            EscalationTrigger::NotTriggered
        };

        let event = EventSeverity::try_from_level(level).map(|severity| CrisisEvent {
            user_id: ctx.user_id.to_string(),
            occurred_at_ms: assessment.assessed_at_ms,
            severity,
            trigger_message: ctx.message.to_string(),
            detected_categories: distinct_categories(&assessment.triggered),
            table_revision: TABLE_REVISION,
            resolution: ResolutionState::Unresolved,
        });

        let show_resources = severity_triggered || trend_triggered;
        let log_event = event.is_some();

        if show_resources {
            metrics.record_resources_shown();
        }
        if trend_triggered {
            metrics.record_trend_triggered();
        }
        if log_event {
            metrics.record_event_logged();
        }

        tracing::debug!(
            "EscalationDecision level={} trigger={:?} show={} log={}",
            level.as_str(),
            trigger,
            show_resources,
            log_event
        );

        EscalationDecision {
            show_resources,
            log_event,
            trigger,
            event,
        }
    }
}

/// Last `n` entries of the history, most-recent-last.
fn tail(levels: &[RiskLevel], n: usize) -> &[RiskLevel] {
    let start = levels.len().saturating_sub(n);
    &levels[start..]
}

/// Whether the trailing `run` entries are all `>= Low`.
///
/// Prior levels above low count toward the run: a moderate message in
/// the trend is a stronger signal than a low one, not a reset. A window
/// shorter than the run never satisfies it, and `run == 0` is rejected
/// outright so a misconfigured policy cannot fire on every message.
fn has_sustained_run(window: &[RiskLevel], run: usize) -> bool {
    if run == 0 || window.len() < run {
        return false;
    }
    window[window.len() - run..]
        .iter()
        .all(|&level| level >= RiskLevel::Low)
}
