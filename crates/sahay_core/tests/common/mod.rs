#![allow(dead_code)]

use sahay_core::risk::{
    Indicator, IndicatorCategory, IndicatorRule, RiskAssessment, RiskAssessor,
    RiskAssessorMetrics, RiskLevel,
};

/// Test helper: assess a message with the built-in table and a fresh
/// metrics tracker.
pub fn assess(message: &str) -> RiskAssessment {
    let assessor = RiskAssessor::new();
    let mut metrics = RiskAssessorMetrics::new();
    assessor.assess(message, 1_000, &mut metrics)
}

/// Test helper: a literal assessment with the given level and no
/// indicators, for policy tests that don't care about scoring.
pub fn assessment_with_level(level: RiskLevel, score: u32) -> RiskAssessment {
    RiskAssessment {
        level,
        score,
        triggered: Vec::new(),
        assessed_at_ms: 1_000,
    }
}

/// Test helper: an indicator literal for category-set tests.
pub fn indicator(category: IndicatorCategory, pos: usize) -> Indicator {
    Indicator {
        category,
        matched_text: "x",
        weight: 1,
        match_pos: pos,
    }
}

/// Two categories sharing a match position: "lost cause" matches both
/// rules at offset 0, so ordering must fall back to the category token.
pub const TIE_TABLE: &[IndicatorRule] = &[
    IndicatorRule {
        category: IndicatorCategory::Isolation,
        weight: 2,
        phrases: &["lost"],
    },
    IndicatorRule {
        category: IndicatorCategory::Hopelessness,
        weight: 4,
        phrases: &["lost cause"],
    },
];
