//! Message scoring: one pass of the indicator table over a normalized
//! message.
//!
//! The assessor is deterministic, stateless, and pure: no I/O, no clocks,
//! no randomness. Calling `assess` twice with the same string yields an
//! identical assessment, including indicator ordering. Timestamps are
//! supplied by the caller.

use super::indicators::{BUILTIN_INDICATOR_TABLE, IndicatorCategory, IndicatorRule};
use super::level::{RiskLevel, level_for_score};
use super::normalize::normalize_message;

/// A detected lexical signal contributing to the message score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub category: IndicatorCategory,
    /// The phrase that matched, in normalized form.
    pub matched_text: &'static str,
    pub weight: u32,
    /// Byte offset of the first occurrence in the normalized input.
    pub match_pos: usize,
}

/// The scored outcome for one inbound message. Immutable once produced;
/// exactly one assessment exists per message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: u32,
    /// Matched indicators, ordered by first match position, ties broken
    /// by category token.
    pub triggered: Vec<Indicator>,
    /// Caller-supplied timestamp (ms).
    pub assessed_at_ms: u64,
}

// --- Metrics -------------------------------------------------------------

/// Observability counters for the assessor.
#[derive(Debug, Default)]
pub struct RiskAssessorMetrics {
    assessed_total: u64,
    flagged_total: u64,
    severe_total: u64,
}

impl RiskAssessorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total messages assessed.
    pub fn assessed_total(&self) -> u64 {
        self.assessed_total
    }

    /// Messages with a non-zero score.
    pub fn flagged_total(&self) -> u64 {
        self.flagged_total
    }

    /// Messages assessed at `Severe`.
    pub fn severe_total(&self) -> u64 {
        self.severe_total
    }

    fn record_assessed(&mut self) {
        self.assessed_total += 1;
    }

    fn record_flagged(&mut self) {
        self.flagged_total += 1;
    }

    fn record_severe(&mut self) {
        self.severe_total += 1;
    }
}

// --- Assessor ------------------------------------------------------------

/// Table-driven message scorer.
///
/// Constructed explicitly and passed to callers; there is no process-wide
/// instance. Tests inject their own tables via `with_table`.
#[derive(Debug, Clone, Copy)]
pub struct RiskAssessor {
    table: &'static [IndicatorRule],
}

impl RiskAssessor {
    /// Assessor over the built-in scoring table.
    pub fn new() -> Self {
        Self {
            table: BUILTIN_INDICATOR_TABLE,
        }
    }

    /// Assessor over a caller-supplied table.
    pub fn with_table(table: &'static [IndicatorRule]) -> Self {
        Self { table }
    }

    /// The table this assessor scores against.
    pub fn table(&self) -> &'static [IndicatorRule] {
        self.table
    }

    /// Score one message.
    ///
    /// Empty or whitespace-only input yields `level = None`, `score = 0`,
    /// and no indicators. Each category contributes its weight at most
    /// once; the score is the sum over matched categories.
    pub fn assess(
        &self,
        message: &str,
        now_ms: u64,
        metrics: &mut RiskAssessorMetrics,
    ) -> RiskAssessment {
        metrics.record_assessed();

        let normalized = normalize_message(message);
        if normalized.is_empty() {
            return RiskAssessment {
                level: RiskLevel::None,
                score: 0,
                triggered: Vec::new(),
                assessed_at_ms: now_ms,
            };
        }

        let mut triggered: Vec<Indicator> = Vec::new();
        for rule in self.table {
            if let Some((match_pos, matched_text)) = first_match(&normalized, rule.phrases) {
                triggered.push(Indicator {
                    category: rule.category,
                    matched_text,
                    weight: rule.weight,
                    match_pos,
                });
            }
        }
        triggered.sort_by(|a, b| {
            a.match_pos
                .cmp(&b.match_pos)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });

        let score: u32 = triggered.iter().map(|i| i.weight).sum();
        let level = level_for_score(score);

        if score > 0 {
            metrics.record_flagged();
            if level == RiskLevel::Severe {
                metrics.record_severe();
            }
            tracing::debug!(
                "RiskFlagged level={} score={} categories={}",
                level.as_str(),
                score,
                triggered.len()
            );
        }

        RiskAssessment {
            level,
            score,
            triggered,
            assessed_at_ms: now_ms,
        }
    }
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Earliest occurrence of any phrase in the normalized input.
///
/// Ties on position go to the phrase listed first in the rule, which
/// keeps the matched text deterministic.
fn first_match(
    normalized: &str,
    phrases: &'static [&'static str],
) -> Option<(usize, &'static str)> {
    let mut best: Option<(usize, &'static str)> = None;
    for &phrase in phrases {
        if let Some(pos) = normalized.find(phrase) {
            match best {
                Some((best_pos, _)) if best_pos <= pos => {}
                _ => best = Some((pos, phrase)),
            }
        }
    }
    best
}
