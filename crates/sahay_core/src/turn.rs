//! Single-message evaluation pipeline.
//!
//! One orchestration function runs assess -> decide for an inbound
//! message, synchronously and with no suspension point, so the decision
//! for message N is computed from message N's text and the caller's
//! history window only.

use crate::escalation::{
    DecisionContext, EscalationDecision, EscalationMetrics, EscalationPolicy,
};
use crate::risk::{RiskAssessment, RiskAssessor, RiskAssessorMetrics, RiskLevel};

/// Inputs for one chat turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnInput<'a> {
    pub user_id: &'a str,
    /// Verbatim inbound message text.
    pub message: &'a str,
    /// Levels from the same session's prior messages, most-recent-last.
    pub recent_levels: &'a [RiskLevel],
    /// Caller-supplied timestamp (ms).
    pub now_ms: u64,
}

/// Aggregated metrics for the turn pipeline.
#[derive(Debug, Default)]
pub struct TurnMetrics {
    pub assessor: RiskAssessorMetrics,
    pub escalation: EscalationMetrics,
}

impl TurnMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Outcome of one chat turn: the assessment and the decision made on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub assessment: RiskAssessment,
    pub decision: EscalationDecision,
}

/// Evaluate one inbound message end to end.
pub fn evaluate_chat_turn(
    assessor: &RiskAssessor,
    policy: &EscalationPolicy,
    input: &TurnInput<'_>,
    metrics: &mut TurnMetrics,
) -> TurnOutcome {
    let assessment = assessor.assess(input.message, input.now_ms, &mut metrics.assessor);
    let ctx = DecisionContext {
        user_id: input.user_id,
        message: input.message,
        recent_levels: input.recent_levels,
    };
    let decision = policy.decide(&ctx, &assessment, &mut metrics.escalation);

    TurnOutcome {
        assessment,
        decision,
    }
}
