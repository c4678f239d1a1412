//! Crisis event payload and its lifecycle types.
//!
//! Events record *what kind* of risk was seen, not the scoring internals:
//! weights and matched text are dropped, category tokens are kept, and
//! the table revision is stamped in so old records stay interpretable
//! after the scoring table changes.

use crate::risk::{Indicator, IndicatorCategory, RiskLevel};

// --- Severity ------------------------------------------------------------

/// Severity recorded on a logged crisis event.
///
/// Deliberately excludes `none` and `low`: those levels produce
/// assessments, never events, and the restriction holds at the type
/// level rather than by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventSeverity {
    Moderate,
    High,
    Severe,
}

impl EventSeverity {
    /// Map an assessed level to an event severity.
    ///
    /// Total for `level >= Moderate`; `None`/`Low` yield `None`.
    pub fn try_from_level(level: RiskLevel) -> Option<Self> {
        match level {
            RiskLevel::None | RiskLevel::Low => None,
            RiskLevel::Moderate => Some(EventSeverity::Moderate),
            RiskLevel::High => Some(EventSeverity::High),
            RiskLevel::Severe => Some(EventSeverity::Severe),
        }
    }

    /// Stable string token for persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            EventSeverity::Moderate => "moderate",
            EventSeverity::High => "high",
            EventSeverity::Severe => "severe",
        }
    }

    /// The risk level this severity corresponds to.
    pub fn as_level(self) -> RiskLevel {
        match self {
            EventSeverity::Moderate => RiskLevel::Moderate,
            EventSeverity::High => RiskLevel::High,
            EventSeverity::Severe => RiskLevel::Severe,
        }
    }
}

// --- Resolution lifecycle ------------------------------------------------

/// Follow-up lifecycle state of a logged event.
///
/// Transitions are forward-only: unresolved -> monitoring -> resolved,
/// with a direct unresolved -> resolved shortcut. The event log is the
/// only writer; assessment code never mutates resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionState {
    Unresolved,
    Monitoring,
    Resolved,
}

impl ResolutionState {
    /// Stable string token for persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionState::Unresolved => "unresolved",
            ResolutionState::Monitoring => "monitoring",
            ResolutionState::Resolved => "resolved",
        }
    }

    /// Whether follow-up is still pending.
    pub fn is_open(self) -> bool {
        !matches!(self, ResolutionState::Resolved)
    }

    /// Whether `next` is a valid forward transition from this state.
    pub fn can_transition_to(self, next: ResolutionState) -> bool {
        matches!(
            (self, next),
            (ResolutionState::Unresolved, ResolutionState::Monitoring)
                | (ResolutionState::Unresolved, ResolutionState::Resolved)
                | (ResolutionState::Monitoring, ResolutionState::Resolved)
        )
    }
}

// --- Event payload -------------------------------------------------------

/// A persisted record of one escalation decision.
///
/// Constructed only by the escalation policy when it decides to log;
/// never by the assessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrisisEvent {
    pub user_id: String,
    /// Timestamp of the triggering assessment (ms).
    pub occurred_at_ms: u64,
    pub severity: EventSeverity,
    /// Verbatim text of the triggering message.
    pub trigger_message: String,
    /// Distinct matched categories, sorted by token.
    pub detected_categories: Vec<IndicatorCategory>,
    /// Revision of the scoring table that produced the assessment.
    pub table_revision: &'static str,
    pub resolution: ResolutionState,
}

/// Distinct categories from a triggered-indicator sequence, sorted by
/// token so the set is deterministic.
pub fn distinct_categories(triggered: &[Indicator]) -> Vec<IndicatorCategory> {
    let mut categories: Vec<IndicatorCategory> = triggered.iter().map(|i| i.category).collect();
    categories.sort_by_key(|c| c.as_str());
    categories.dedup();
    categories
}
